//! Bulk transfer between slices, and explicit growth.
//!
//! | Operation | Writes at | Allocates | Too little room |
//! |-----------|-----------|-----------|-----------------|
//! | [`copy`](Slice::copy)                 | offset 0 (overwrites) | never  | truncates |
//! | [`append`](Slice::append)             | offset `len`          | never  | truncates |
//! | [`merge`](Slice::merge)               | new allocation        | always | n/a       |
//! | [`checked_grow`](Slice::checked_grow) | new allocation        | if needed | n/a    |

use allocator_api2::alloc::Allocator;

use crate::cells::copy_cells;
use crate::error::{fatal, SliceError};
use crate::Slice;

impl<T: Copy, A: Allocator> Slice<'_, T, A> {
    /// Overwrites the front of this slice with the front of `src`.
    ///
    /// Copies `min(self.capacity(), src.len())` elements to offset 0 and
    /// returns that count. The length grows to cover the copied elements but
    /// never shrinks. `src` may alias this slice.
    ///
    /// # Example
    ///
    /// ```
    /// use std::cell::Cell;
    /// use bounded_slice::Slice;
    ///
    /// let mut a = [1, 2, 3, 4];
    /// {
    ///     let cells = Cell::from_mut(&mut a[..]).as_slice_of_cells();
    ///     let mut b = Slice::from_cells(cells, 0, 2);
    ///     let c = Slice::from_cells(cells, 2, 4);
    ///     assert_eq!(b.copy(&c), 2);
    /// }
    /// assert_eq!(a, [3, 4, 3, 4]);
    /// ```
    pub fn copy<B: Allocator>(&mut self, src: &Slice<'_, T, B>) -> usize {
        let count = self.fit_len(src);
        copy_cells(&self.as_cells()[..count], &src.live_cells()[..count]);
        self.len = self.len.max(count);
        count
    }

    /// Copies as much of `src` as fits after the last live element.
    ///
    /// Copies `min(self.remaining(), src.len())` elements, extends the length
    /// by that count and returns it. Whatever does not fit is dropped.
    pub fn append<B: Allocator>(&mut self, src: &Slice<'_, T, B>) -> usize {
        let count = self.remaining().min(src.len());
        let start = self.len;
        copy_cells(
            &self.as_cells()[start..start + count],
            &src.live_cells()[..count],
        );
        self.len += count;
        count
    }
}

impl<'a, T: Copy + Default, A: Allocator + Clone> Slice<'a, T, A> {
    /// Concatenates `self` and `other` into a new owning slice.
    ///
    /// The result's length and capacity are both `self.len() + other.len()`,
    /// it is allocated with this slice's allocator, and it shares no storage
    /// with either input. Neither input changes.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails or its size overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_slice::Slice;
    ///
    /// let mut a = [1, 2, 3, 4];
    /// let b = Slice::from_array(&mut a, 0, 4);
    /// let d = b.sub_slice(0, 2).merge(&b.sub_slice(2, 4));
    /// assert!(d.owns_storage());
    /// assert_ne!(d.as_ptr(), b.as_ptr());
    /// assert_eq!(d, [1, 2, 3, 4]);
    /// ```
    #[track_caller]
    pub fn merge<B: Allocator>(&self, other: &Slice<'_, T, B>) -> Slice<'static, T, A> {
        match self.try_merge(other) {
            Ok(merged) => merged,
            Err(err) => fatal(err),
        }
    }

    /// Concatenates `self` and `other` into a new owning slice, reporting failure.
    pub fn try_merge<B: Allocator>(
        &self,
        other: &Slice<'_, T, B>,
    ) -> Result<Slice<'static, T, A>, SliceError> {
        let total = self
            .len
            .checked_add(other.len())
            .ok_or(SliceError::CapacityOverflow)?;
        let mut merged = Slice::try_make_in(total, self.alloc.clone())?;
        merged.append(self);
        merged.append(other);
        Ok(merged)
    }

    /// Makes room for `additional` more elements, reallocating if needed.
    ///
    /// If `len + additional` already fits, nothing happens. Otherwise a new
    /// owning allocation of capacity `len + growth_block` is made, the live
    /// elements are copied into it, the old storage is released and this
    /// handle takes over the new storage. Growth is entirely caller-driven:
    /// there is no doubling or other automatic factor.
    ///
    /// The new capacity is taken as given, even when `growth_block` is
    /// smaller than `additional`; the next push past it then fails as usual.
    ///
    /// Views taken over the old storage do not follow the move.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails or its size overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_slice::Slice;
    ///
    /// let mut a: Slice<i32> = Slice::make(2);
    /// a.push(1);
    /// a.push(2);
    /// a.checked_grow(1, 8);
    /// assert_eq!(a.capacity(), 10);
    /// a.push(3);
    /// assert_eq!(a, [1, 2, 3]);
    /// ```
    #[track_caller]
    pub fn checked_grow(&mut self, additional: usize, growth_block: usize) {
        if let Err(err) = self.try_checked_grow(additional, growth_block) {
            fatal(err);
        }
    }

    /// Makes room for `additional` more elements, reporting failure.
    ///
    /// On error the slice is left as it was.
    pub fn try_checked_grow(
        &mut self,
        additional: usize,
        growth_block: usize,
    ) -> Result<(), SliceError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(SliceError::CapacityOverflow)?;
        if required <= self.capacity() {
            return Ok(());
        }
        let capacity = self
            .len
            .checked_add(growth_block)
            .ok_or(SliceError::CapacityOverflow)?;

        let mut grown = Slice::try_make_in(capacity, self.alloc.clone())?;
        grown.append(&*self);
        self.release();
        *self = grown;
        Ok(())
    }
}
