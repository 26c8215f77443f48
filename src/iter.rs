//! Iterator over a `Slice`.

use std::cell::Cell;
use std::iter::FusedIterator;

/// An iterator over copies of the live elements of a [`Slice`](crate::Slice).
///
/// Elements are read when the iterator reaches them, so a write through an
/// aliasing view during iteration is observed by the remaining items.
#[derive(Clone)]
pub struct Iter<'a, T> {
    cells: std::slice::Iter<'a, Cell<T>>,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(cells: &'a [Cell<T>]) -> Self {
        Self { cells: cells.iter() }
    }
}

impl<T: Copy> Iterator for Iter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.cells.next().map(Cell::get)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<T> {
        self.cells.nth(n).map(Cell::get)
    }
}

impl<T: Copy> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.cells.next_back().map(Cell::get)
    }
}

impl<T: Copy> ExactSizeIterator for Iter<'_, T> {}

impl<T: Copy> FusedIterator for Iter<'_, T> {}
