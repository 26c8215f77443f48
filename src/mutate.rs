//! In-place mutation: single-element and range operations.
//!
//! None of these reallocate. Each plain operation panics on a capacity,
//! underflow or range violation; its `try_` twin reports the violation
//! and leaves the slice untouched.

use allocator_api2::alloc::Allocator;

use crate::cells::move_within;
use crate::error::{fatal, SliceError};
use crate::Slice;

impl<T: Copy, A: Allocator> Slice<'_, T, A> {
    /// Appends `item` after the last live element.
    ///
    /// # Panics
    ///
    /// Panics if the slice is at capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_slice::Slice;
    ///
    /// let mut a: Slice<i32> = Slice::make(2);
    /// a.push(1);
    /// a.push(2);
    /// assert!(a.try_push(3).is_err());
    /// assert_eq!(a, [1, 2]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn push(&mut self, item: T) {
        if let Err(err) = self.try_push(item) {
            fatal(err);
        }
    }

    /// Appends `item`, or reports [`SliceError::CapacityExceeded`].
    #[inline]
    pub fn try_push(&mut self, item: T) -> Result<(), SliceError> {
        let capacity = self.capacity();
        if self.len >= capacity {
            return Err(SliceError::capacity_exceeded(self.len + 1, capacity));
        }
        self.as_cells()[self.len].set(item);
        self.len += 1;
        Ok(())
    }

    /// Removes the last live element and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the slice is empty.
    #[inline]
    #[track_caller]
    pub fn pop(&mut self) -> T {
        match self.try_pop() {
            Ok(item) => item,
            Err(err) => fatal(err),
        }
    }

    /// Removes the last live element, or reports [`SliceError::Underflow`].
    #[inline]
    pub fn try_pop(&mut self) -> Result<T, SliceError> {
        if self.len == 0 {
            return Err(SliceError::Underflow);
        }
        self.len -= 1;
        Ok(self.as_cells()[self.len].get())
    }

    /// Inserts `item` at `index`, shifting the elements after it one place right.
    ///
    /// # Panics
    ///
    /// Panics if the slice is at capacity or `index > len`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, item: T) {
        if let Err(err) = self.try_insert(index, item) {
            fatal(err);
        }
    }

    /// Inserts `item` at `index`, or reports why it cannot.
    pub fn try_insert(&mut self, index: usize, item: T) -> Result<(), SliceError> {
        let capacity = self.capacity();
        if self.len >= capacity {
            return Err(SliceError::capacity_exceeded(self.len + 1, capacity));
        }
        if index > self.len {
            return Err(SliceError::out_of_range(index, index, self.len));
        }
        let cells = self.as_cells();
        move_within(cells, index..self.len, index + 1);
        cells[index].set(item);
        self.len += 1;
        Ok(())
    }

    /// Splices every live element of `other` in at `index`.
    ///
    /// The elements from `index` onwards move right by `other.len()` places.
    /// This undoes a [`cut`](Self::cut) of the same range.
    ///
    /// If `other` aliases this slice's storage, it is read after the shift.
    ///
    /// # Panics
    ///
    /// Panics if the combined length exceeds the capacity or `index > len`.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_slice::Slice;
    ///
    /// let mut a: Slice<i32> = Slice::make(10);
    /// a.push(1);
    /// a.push(2);
    /// a.push(3);
    /// let mut b: Slice<i32> = Slice::make(2);
    /// b.push(7);
    /// b.push(8);
    ///
    /// a.put(1, &b);
    /// assert_eq!(a, [1, 7, 8, 2, 3]);
    /// a.cut(1, 3);
    /// assert_eq!(a, [1, 2, 3]);
    /// ```
    #[track_caller]
    pub fn put<B: Allocator>(&mut self, index: usize, other: &Slice<'_, T, B>) {
        if let Err(err) = self.try_put(index, other) {
            fatal(err);
        }
    }

    /// Splices `other` in at `index`, or reports why it cannot.
    pub fn try_put<B: Allocator>(
        &mut self,
        index: usize,
        other: &Slice<'_, T, B>,
    ) -> Result<(), SliceError> {
        let count = other.len();
        let capacity = self.capacity();
        let required = self
            .len
            .checked_add(count)
            .ok_or(SliceError::CapacityOverflow)?;
        if required > capacity {
            return Err(SliceError::capacity_exceeded(required, capacity));
        }
        if index > self.len {
            return Err(SliceError::out_of_range(index, index, self.len));
        }
        let cells = self.as_cells();
        move_within(cells, index..self.len, index + count);
        for (dst, src) in cells[index..index + count].iter().zip(other.live_cells()) {
            dst.set(src.get());
        }
        self.len = required;
        Ok(())
    }

    /// Writes `item` at `index`, anywhere below the capacity.
    ///
    /// Writing at or past the length extends the length to `index + 1`. The
    /// elements skipped over keep whatever they held.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, index: usize, item: T) {
        if let Err(err) = self.try_set(index, item) {
            fatal(err);
        }
    }

    /// Writes `item` at `index`, or reports [`SliceError::OutOfRange`].
    #[inline]
    pub fn try_set(&mut self, index: usize, item: T) -> Result<(), SliceError> {
        let Some(cell) = self.as_cells().get(index) else {
            return Err(SliceError::out_of_range(
                index,
                index.saturating_add(1),
                self.capacity(),
            ));
        };
        cell.set(item);
        if index >= self.len {
            self.len = index + 1;
        }
        Ok(())
    }

    /// Removes the live range `start..end`.
    ///
    /// Everything from `end` up to the capacity moves left by `end - start`
    /// places, reserved elements included, and the length drops by the same
    /// amount.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= len`.
    #[track_caller]
    pub fn cut(&mut self, start: usize, end: usize) {
        if let Err(err) = self.try_cut(start, end) {
            fatal(err);
        }
    }

    /// Removes the live range `start..end`, or reports [`SliceError::OutOfRange`].
    pub fn try_cut(&mut self, start: usize, end: usize) -> Result<(), SliceError> {
        if start > end || end > self.len {
            return Err(SliceError::out_of_range(start, end, self.len));
        }
        let cells = self.as_cells();
        move_within(cells, end..cells.len(), start);
        self.len -= end - start;
        Ok(())
    }

    /// Removes the element at `index`, shifting the rest one place left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    #[track_caller]
    pub fn delete(&mut self, index: usize) {
        if let Err(err) = self.try_delete(index) {
            fatal(err);
        }
    }

    /// Removes the element at `index`, or reports [`SliceError::OutOfRange`].
    #[inline]
    pub fn try_delete(&mut self, index: usize) -> Result<(), SliceError> {
        if index >= self.len {
            return Err(SliceError::out_of_range(
                index,
                index.saturating_add(1),
                self.len,
            ));
        }
        self.try_cut(index, index + 1)
    }
}

impl<T: Copy + Default, A: Allocator> Slice<'_, T, A> {
    /// Resets every live element to `T::default()`. The length is unchanged.
    pub fn clear(&mut self) {
        for cell in self.live_cells() {
            cell.set(T::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::{Slice, SliceError};

    fn filled(capacity: usize, n: i32) -> Slice<'static, i32> {
        let mut s = Slice::make(capacity);
        for i in 0..n {
            s.push(i);
        }
        s
    }

    #[test]
    fn test_push_pop_lifo() {
        let mut a = filled(6, 6);
        assert_eq!(a.len(), 6);
        assert_eq!(a, [0, 1, 2, 3, 4, 5]);
        for expected in (0..6).rev() {
            assert_eq!(a.pop(), expected);
        }
        assert!(a.is_empty());
    }

    #[test]
    #[should_panic(expected = "capacity exceeded")]
    fn test_push_past_capacity() {
        let mut a = filled(2, 2);
        a.push(2);
    }

    #[test]
    #[should_panic(expected = "empty slice")]
    fn test_pop_empty() {
        let mut a: Slice<i32> = Slice::make(2);
        a.pop();
    }

    #[test]
    fn test_try_pop_empty() {
        let mut a: Slice<i32> = Slice::make(2);
        assert_eq!(a.try_pop(), Err(SliceError::Underflow));
    }

    #[test]
    fn test_insert_front() {
        let mut a: Slice<i32> = Slice::make(10);
        a.insert(0, 2);
        assert_eq!(a, [2]);
        a.insert(0, 1);
        assert_eq!(a, [1, 2]);
        a.insert(0, 0);
        assert_eq!(a, [0, 1, 2]);
        a.insert(3, 3);
        assert_eq!(a, [0, 1, 2, 3]);
    }

    #[test]
    fn test_insert_checks() {
        let mut a = filled(3, 2);
        assert_eq!(
            a.try_insert(3, 9),
            Err(SliceError::out_of_range(3, 3, 2))
        );
        a.insert(1, 9);
        assert_eq!(
            a.try_insert(0, 9),
            Err(SliceError::capacity_exceeded(4, 3))
        );
        assert_eq!(a, [0, 9, 1]);
    }

    #[test]
    fn test_put_and_cut_are_inverse() {
        let mut a: Slice<i32> = Slice::make(10);
        for v in [1, 2, 3] {
            a.push(v);
        }
        let mut b: Slice<i32> = Slice::make(2);
        b.push(7);
        b.push(8);

        a.put(1, &b);
        assert_eq!(a, [1, 7, 8, 2, 3]);
        a.cut(1, 3);
        assert_eq!(a, [1, 2, 3]);
        a.put(0, &b);
        assert_eq!(a, [7, 8, 1, 2, 3]);
        a.put(5, &b);
        assert_eq!(a, [7, 8, 1, 2, 3, 7, 8]);
    }

    #[test]
    fn test_put_aliased_source_is_read_after_shift() {
        let mut buf = [1, 2, 3, 4, 0, 0, 0, 0];
        {
            let cells = Cell::from_mut(&mut buf[..]).as_slice_of_cells();
            let parent = Slice::from_cells(cells, 0, 8);
            let mut a = parent.sub_slice(0, 4);
            let other = parent.sub_slice(2, 4);
            // The shift turns cells 2..4 into [3, 2] before they are copied.
            a.put(1, &other);
            assert_eq!(a, [1, 3, 2, 2, 3, 4]);
        }
        assert_eq!(buf, [1, 3, 2, 2, 3, 4, 0, 0]);
    }

    #[test]
    fn test_put_past_capacity() {
        let mut a = filled(4, 3);
        let b = filled(2, 2);
        assert_eq!(
            a.try_put(0, &b),
            Err(SliceError::capacity_exceeded(5, 4))
        );
        assert_eq!(a, [0, 1, 2]);
    }

    #[test]
    fn test_set_extends_len() {
        let mut a: Slice<i32> = Slice::make(5);
        a.set(0, 10);
        assert_eq!(a.len(), 1);
        a.set(3, 40);
        assert_eq!(a.len(), 4);
        assert_eq!(a, [10, 0, 0, 40]);
        a.set(1, 20);
        assert_eq!(a.len(), 4);
        assert_eq!(
            a.try_set(5, 0),
            Err(SliceError::out_of_range(5, 6, 5))
        );
    }

    #[test]
    fn test_set_keeps_skipped_contents() {
        let a: Slice<i32> = Slice::make(4);
        a.as_cells()[1].set(77);
        let mut b = a.view();
        b.set(2, 5);
        assert_eq!(b, [0, 77, 5]);
    }

    #[test]
    fn test_cut_delete_clear() {
        let mut a = filled(6, 6);
        a.cut(0, 3);
        assert_eq!(a, [3, 4, 5]);
        a.delete(0);
        assert_eq!(a.first(), Some(4));
        assert_eq!(a, [4, 5]);
        a.clear();
        assert_eq!(a, [0, 0]);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_cut_moves_reserved_tail() {
        let mut buf = [0, 1, 2, 3, 4, 5];
        let cells = Cell::from_mut(&mut buf[..]).as_slice_of_cells();
        let parent = Slice::from_cells(cells, 0, 6);
        let mut a = parent.sub_slice(0, 3);
        a.cut(0, 1);
        assert_eq!(a, [1, 2]);
        assert_eq!(parent, [1, 2, 3, 4, 5, 5]);
    }

    #[test]
    fn test_cut_range_checks() {
        let mut a = filled(6, 4);
        assert_eq!(a.try_cut(3, 2), Err(SliceError::out_of_range(3, 2, 4)));
        assert_eq!(a.try_cut(2, 5), Err(SliceError::out_of_range(2, 5, 4)));
        assert!(a.try_cut(2, 2).is_ok());
        assert_eq!(a.len(), 4);
        assert_eq!(a.try_delete(4), Err(SliceError::out_of_range(4, 5, 4)));
    }

    #[test]
    fn test_sub_slice_push_reaches_parent_boundary() {
        let mut buf = [1, 2, 3, 4];
        let cells = Cell::from_mut(&mut buf[..]).as_slice_of_cells();
        let parent = Slice::from_cells(cells, 0, 4);
        let mut view = parent.sub_slice(1, 1);
        view.push(20);
        view.push(30);
        view.push(40);
        assert!(view.try_push(50).is_err());
        assert_eq!(parent, [1, 20, 30, 40]);
    }
}
