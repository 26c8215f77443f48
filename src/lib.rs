//! Bounds-tracked slices over borrowed or owned storage.
//!
//! A [`Slice`] is a small handle (start, length, capacity, ownership) over a
//! contiguous run of elements. It either borrows memory the caller already
//! has, or owns a fresh zero-initialised allocation. Every mutation stays
//! inside the handle's capacity and fails instead of reallocating; the only
//! operations that allocate are [`Slice::make`], [`Slice::merge`] and
//! [`Slice::checked_grow`].
//!
//! # Example
//!
//! ```
//! use bounded_slice::Slice;
//!
//! let mut a: Slice<i32> = Slice::make(6);
//! for i in 0..6 {
//!     a.push(i);
//! }
//!
//! a.cut(0, 3);
//! assert_eq!(a, [3, 4, 5]);
//!
//! a.delete(0);
//! assert_eq!(a.first(), Some(4));
//!
//! a.clear();
//! assert_eq!(a, [0, 0]);
//! ```
//!
//! # Aliasing
//!
//! Sub-slices share their parent's storage. A write through one handle is
//! visible through every other handle that covers the same element. Elements
//! are held in [`Cell`]s, which makes this sound without `unsafe` at the call
//! site; the price is that elements are `Copy` and are read by value.
//!
//! A sub-slice's capacity runs from its start to the end of the parent's
//! capacity, not to the end of the requested range, so a view can `push` up
//! to the parent's boundary and overwrite whatever the parent holds there.
//!
//! # Growth invalidates views
//!
//! [`Slice::checked_grow`] moves the contents into a new allocation. Any other
//! view that was taken over the old storage keeps looking at the old storage
//! and no longer sees the grown slice. For owning slices the borrow checker
//! rejects this outright: a view borrows its owner, so the owner cannot be
//! grown, released or dropped while the view is alive. For views over caller
//! buffers ([`Slice::from_cells`]), the old buffer stays valid but stale.
//!
//! # Errors
//!
//! Capacity, underflow and range violations are programming errors: the plain
//! operations panic. Each of them has a `try_` twin that returns a
//! [`SliceError`] instead. [`Slice::copy`] and [`Slice::append`] truncate
//! and report how much was transferred; they never fail.

mod cells;
pub mod error;
mod iter;
mod mutate;
mod raw_buf;
pub mod search;
mod transfer;

use std::cell::Cell;
use std::fmt;

use allocator_api2::alloc::{Allocator, Global};

pub use error::SliceError;
pub use iter::Iter;
pub use search::{
    insert_sorted, insertion_point, search_sorted_indices, sort_indices, sorted_index_search,
    try_insert_sorted,
};

use error::fatal;
use raw_buf::RawBuf;

/// Backing storage of a [`Slice`].
enum Storage<'a, T, A: Allocator> {
    /// Cells owned by someone else, starting at the slice's first element.
    Borrowed(&'a [Cell<T>]),
    /// An allocation this slice releases.
    Owned(RawBuf<T, A>),
    /// Released or never attached; capacity 0.
    Released,
}

/// A bounds-tracked view over a contiguous run of `T`.
///
/// See the [crate documentation](crate) for the aliasing and growth rules.
pub struct Slice<'a, T, A: Allocator = Global> {
    /// Where the elements live
    storage: Storage<'a, T, A>,
    /// Number of live elements
    len: usize,
    /// Allocator used by `merge` and `checked_grow`
    alloc: A,
}

impl<'a, T: Copy> Slice<'a, T> {
    /// Creates a view over `buffer[start..end]`.
    ///
    /// The length and capacity are both `end - start`. The buffer stays
    /// mutably borrowed for as long as the view lives.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= buffer.len()`.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_slice::Slice;
    ///
    /// let mut a = [1, 2, 3, 4];
    /// let b = Slice::from_array(&mut a, 0, 4);
    /// let c = b.sub_slice(1, 2);
    /// assert_eq!(c.len(), 1);
    /// assert_eq!(c.capacity(), 3);
    /// ```
    #[track_caller]
    pub fn from_array(buffer: &'a mut [T], start: usize, end: usize) -> Self {
        Self::from_cells(Cell::from_mut(buffer).as_slice_of_cells(), start, end)
    }

    /// Creates a view over `cells[start..end]`.
    ///
    /// Unlike [`from_array`](Self::from_array) this only needs a shared
    /// borrow, so several views over one buffer can coexist.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= cells.len()`.
    #[track_caller]
    pub fn from_cells(cells: &'a [Cell<T>], start: usize, end: usize) -> Self {
        match Self::try_from_cells_in(cells, start, end, Global) {
            Ok(slice) => slice,
            Err(err) => fatal(err),
        }
    }
}

impl<'a, T: Copy + Default> Slice<'a, T> {
    /// Allocates `capacity` zeroed elements. The slice starts empty.
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
    /// let a: Slice<i32> = Slice::make(6);
    /// assert!(a.is_empty());
    /// assert_eq!(a.capacity(), 6);
    /// assert!(a.owns_storage());
    /// ```
    #[track_caller]
    pub fn make(capacity: usize) -> Self {
        Self::make_in(capacity, Global)
    }
}

impl<'a, T: Copy + Default, A: Allocator + Clone> Slice<'a, T, A> {
    /// Allocates `capacity` zeroed elements in `alloc`. The slice starts empty.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails or its size overflows.
    #[track_caller]
    pub fn make_in(capacity: usize, alloc: A) -> Self {
        match Self::try_make_in(capacity, alloc) {
            Ok(slice) => slice,
            Err(err) => fatal(err),
        }
    }

    /// Allocates `capacity` zeroed elements in `alloc`, reporting failure.
    pub fn try_make_in(capacity: usize, alloc: A) -> Result<Self, SliceError> {
        let raw = RawBuf::try_zeroed_in(capacity, alloc.clone())?;
        Ok(Self {
            storage: Storage::Owned(raw),
            len: 0,
            alloc,
        })
    }
}

impl<'a, T: Copy, A: Allocator + Clone> Slice<'a, T, A> {
    /// Creates a view over `cells[start..end]` that allocates in `alloc` when grown or merged.
    pub fn try_from_cells_in(
        cells: &'a [Cell<T>],
        start: usize,
        end: usize,
        alloc: A,
    ) -> Result<Self, SliceError> {
        if start > end || end > cells.len() {
            return Err(SliceError::out_of_range(start, end, cells.len()));
        }
        Ok(Self {
            storage: Storage::Borrowed(&cells[start..end]),
            len: end - start,
            alloc,
        })
    }

    /// Returns a view of elements `start..end` of this slice.
    ///
    /// The view's capacity is `self.capacity() - start`: it reaches to the end
    /// of this slice's capacity, not just to `end`. The view never owns its
    /// storage, whatever this slice does.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= self.capacity()`.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_slice::Slice;
    ///
    /// let a: Slice<i32> = Slice::make(6);
    /// for i in 0..6 {
    ///     let mut b = a.sub_slice(i, i + 1);
    ///     b.set(0, i as i32 * 10);
    /// }
    /// assert_eq!(a.capacity(), 6);
    /// assert_eq!(a.as_cells()[5].get(), 50);
    /// ```
    #[track_caller]
    pub fn sub_slice(&self, start: usize, end: usize) -> Slice<'_, T, A> {
        match self.try_sub_slice(start, end) {
            Ok(slice) => slice,
            Err(err) => fatal(err),
        }
    }

    /// Returns a view of elements `start..end`, or an error if the range is invalid.
    pub fn try_sub_slice(&self, start: usize, end: usize) -> Result<Slice<'_, T, A>, SliceError> {
        let capacity = self.capacity();
        if start > end || end > capacity {
            return Err(SliceError::out_of_range(start, end, capacity));
        }
        Ok(Slice {
            storage: Storage::Borrowed(&self.as_cells()[start..]),
            len: end - start,
            alloc: self.alloc.clone(),
        })
    }

    /// Returns a non-owning view with the same start, length and capacity.
    #[inline]
    pub fn view(&self) -> Slice<'_, T, A> {
        Slice {
            storage: Storage::Borrowed(self.as_cells()),
            len: self.len,
            alloc: self.alloc.clone(),
        }
    }
}

impl<'a, T: Copy, A: Allocator> Slice<'a, T, A> {
    /// Returns the number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the slice has no live elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements reachable from the slice's start.
    #[inline]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Borrowed(cells) => cells.len(),
            Storage::Owned(raw) => raw.capacity(),
            Storage::Released => 0,
        }
    }

    /// Returns how many more elements fit before the capacity is reached.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    /// Returns `true` if this handle releases its storage.
    #[inline]
    pub fn owns_storage(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Returns `true` once [`release`](Self::release) has run.
    #[inline]
    pub fn is_released(&self) -> bool {
        matches!(self.storage, Storage::Released)
    }

    /// Returns a pointer to the first element, or null for a released slice.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        match &self.storage {
            Storage::Released => std::ptr::null(),
            _ => self.as_cells().as_ptr().cast::<T>(),
        }
    }

    /// Returns the size in bytes of one element.
    #[inline]
    pub const fn item_size(&self) -> usize {
        std::mem::size_of::<T>()
    }

    /// Returns how many of `src`'s elements fit in this slice's capacity.
    #[inline]
    pub fn fit_len<B: Allocator>(&self, src: &Slice<'_, T, B>) -> usize {
        self.capacity().min(src.len())
    }

    /// Returns the allocator used when this slice grows or merges.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns every cell up to the capacity, live or reserved.
    ///
    /// Writing through a cell beyond `len` does not change the length.
    #[inline]
    pub fn as_cells(&self) -> &[Cell<T>] {
        match &self.storage {
            Storage::Borrowed(cells) => cells,
            Storage::Owned(raw) => raw.as_cells(),
            Storage::Released => &[],
        }
    }

    /// Returns the live elements as a plain mutable slice.
    ///
    /// Only owning slices can hand this out: a borrowed view may share its
    /// cells with other views. Returns `None` for views and released slices.
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        let len = self.len;
        match &mut self.storage {
            Storage::Owned(raw) => Some(&mut raw.as_mut_slice()[..len]),
            _ => None,
        }
    }

    /// Returns the live cells.
    #[inline]
    pub(crate) fn live_cells(&self) -> &[Cell<T>] {
        &self.as_cells()[..self.len]
    }

    /// Returns the element at `index`, or `None` if it is not live.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.live_cells().get(index).map(Cell::get)
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> T {
        match self.get(index) {
            Some(value) => value,
            None => fatal(SliceError::out_of_range(
                index,
                index.saturating_add(1),
                self.len,
            )),
        }
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<T> {
        self.get(0)
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Returns an iterator over copies of the live elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.live_cells())
    }

    /// Copies the live elements into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Releases the storage and resets the handle.
    ///
    /// An owning slice frees its allocation; a view just forgets its
    /// borrowed cells. Either way the handle ends up with no storage, length
    /// 0 and capacity 0, and releasing it again does nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_slice::Slice;
    ///
    /// let mut a: Slice<u8> = Slice::make(4);
    /// a.release();
    /// a.release();
    /// assert!(a.is_released());
    /// assert_eq!(a.capacity(), 0);
    /// ```
    pub fn release(&mut self) {
        self.storage = Storage::Released;
        self.len = 0;
    }
}

impl<'a, T: Copy> From<&'a mut [T]> for Slice<'a, T> {
    /// Views the whole buffer.
    fn from(buffer: &'a mut [T]) -> Self {
        let len = buffer.len();
        Self::from_array(buffer, 0, len)
    }
}

impl<'a, T: Copy> From<&'a [Cell<T>]> for Slice<'a, T> {
    /// Views the whole cell buffer.
    fn from(cells: &'a [Cell<T>]) -> Self {
        Self::from_cells(cells, 0, cells.len())
    }
}

impl<'s, 'a, T: Copy, A: Allocator> IntoIterator for &'s Slice<'a, T, A> {
    type Item = T;
    type IntoIter = Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Copy + fmt::Debug, A: Allocator> fmt::Debug for Slice<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A, B> PartialEq<Slice<'_, T, B>> for Slice<'_, T, A>
where
    T: Copy + PartialEq,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &Slice<'_, T, B>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Copy + PartialEq, A: Allocator> PartialEq<[T]> for Slice<'_, T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter().copied())
    }
}

impl<T: Copy + PartialEq, A: Allocator> PartialEq<&[T]> for Slice<'_, T, A> {
    fn eq(&self, other: &&[T]) -> bool {
        *self == **other
    }
}

impl<T: Copy + PartialEq, A: Allocator, const N: usize> PartialEq<[T; N]> for Slice<'_, T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        *self == other[..]
    }
}

impl<T: Copy + PartialEq, A: Allocator> PartialEq<Vec<T>> for Slice<'_, T, A> {
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == other[..]
    }
}
