//! Raw buffer allocation for owning `Slice`s.
//!
//! This module handles the low-level allocation behind an owning slice,
//! similar to how `RawVec` works for `Vec` in the standard library. It
//! computes layouts, talks to the allocator and releases the memory, but
//! does not track the number of live elements.

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use allocator_api2::alloc::{Allocator, Global};

use crate::error::SliceError;

/// A fixed-capacity, zero-initialised run of `Cell<T>`.
///
/// Every cell is initialised at allocation time, so the whole capacity is
/// always readable. The allocation never moves or resizes; growth happens by
/// allocating a new `RawBuf` and copying.
pub(crate) struct RawBuf<T, A: Allocator = Global> {
    /// Start of the allocation
    ptr: NonNull<Cell<T>>,
    /// Number of cells allocated
    cap: usize,
    /// Allocator that owns `ptr`
    alloc: A,
}

impl<T: Copy + Default, A: Allocator> RawBuf<T, A> {
    /// Allocates `cap` cells in `alloc`, each holding `T::default()`.
    pub(crate) fn try_zeroed_in(cap: usize, alloc: A) -> Result<Self, SliceError> {
        let layout = Layout::array::<Cell<T>>(cap).map_err(|_| SliceError::CapacityOverflow)?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            alloc
                .allocate(layout)
                .map_err(|_| SliceError::AllocError { layout })?
                .cast::<Cell<T>>()
        };

        for i in 0..cap {
            // Safety: `i < cap` and the allocation holds `cap` cells.
            unsafe { ptr.as_ptr().add(i).write(Cell::new(T::default())) };
        }

        Ok(Self { ptr, cap, alloc })
    }
}

impl<T, A: Allocator> RawBuf<T, A> {
    /// Returns the number of allocated cells.
    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns every allocated cell.
    #[inline]
    pub(crate) fn as_cells(&self) -> &[Cell<T>] {
        // Safety: all `cap` cells were initialised in `try_zeroed_in`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.cap) }
    }

    /// Returns every allocated element as a plain mutable slice.
    ///
    /// The exclusive borrow guarantees no `&[Cell<T>]` into this buffer is alive.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: `Cell<T>` has the same layout as `T`, and `&mut self` rules
        // out any outstanding shared view of the cells.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().cast::<T>(), self.cap) }
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        // `Cell<T>` for `T: Copy` has no drop glue, so only the memory is freed.
        if let Ok(layout) = Layout::array::<Cell<T>>(self.cap) {
            if layout.size() != 0 {
                // Safety: `ptr` was allocated in `alloc` with this exact layout.
                unsafe { self.alloc.deallocate(self.ptr.cast(), layout) };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed() {
        let raw: RawBuf<i32> = RawBuf::try_zeroed_in(6, Global).unwrap();
        assert_eq!(raw.capacity(), 6);
        assert!(raw.as_cells().iter().all(|c| c.get() == 0));
    }

    #[test]
    fn test_zero_capacity_does_not_allocate() {
        let raw: RawBuf<u64> = RawBuf::try_zeroed_in(0, Global).unwrap();
        assert_eq!(raw.capacity(), 0);
        assert!(raw.as_cells().is_empty());
    }

    #[test]
    fn test_zst() {
        let raw: RawBuf<()> = RawBuf::try_zeroed_in(1000, Global).unwrap();
        assert_eq!(raw.as_cells().len(), 1000);
    }

    #[test]
    fn test_capacity_overflow() {
        let result: Result<RawBuf<u64>, _> = RawBuf::try_zeroed_in(usize::MAX, Global);
        assert!(matches!(result, Err(SliceError::CapacityOverflow)));
    }

    #[test]
    fn test_mut_slice_sees_cell_writes() {
        let mut raw: RawBuf<i32> = RawBuf::try_zeroed_in(3, Global).unwrap();
        raw.as_cells()[1].set(7);
        assert_eq!(raw.as_mut_slice(), &mut [0, 7, 0]);
        raw.as_mut_slice()[2] = 9;
        assert_eq!(raw.as_cells()[2].get(), 9);
    }
}
