//! Element moves over `Cell` runs.
//!
//! Views alias through shared `&[Cell<T>]`, so every bulk move is an
//! element-by-element copy whose direction is picked from the addresses,
//! giving `memmove` semantics for overlapping runs.

use std::cell::Cell;
use std::ops::Range;

/// Copies `src` into `dst`. Both must have the same length; they may overlap.
#[inline]
pub(crate) fn copy_cells<T: Copy>(dst: &[Cell<T>], src: &[Cell<T>]) {
    debug_assert_eq!(dst.len(), src.len());
    if dst.as_ptr() <= src.as_ptr() {
        for (d, s) in dst.iter().zip(src) {
            d.set(s.get());
        }
    } else {
        for (d, s) in dst.iter().zip(src).rev() {
            d.set(s.get());
        }
    }
}

/// Moves `cells[src]` so that it starts at `dest`.
#[inline]
pub(crate) fn move_within<T: Copy>(cells: &[Cell<T>], src: Range<usize>, dest: usize) {
    let count = src.len();
    copy_cells(&cells[dest..dest + count], &cells[src]);
}
