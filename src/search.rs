//! Binary search through a sorted index array.
//!
//! The values stay in insertion order in one slice; a second slice of
//! `usize` holds a permutation of their positions such that
//! `values[indices[0]] <= values[indices[1]] <= ...` under the caller's
//! comparator. Searching and inserting work on the index array, so the
//! values themselves never move.
//!
//! # Example
//!
//! ```
//! use bounded_slice::{search_sorted_indices, sort_indices, sorted_index_search, Slice};
//!
//! let mut values: Slice<f64> = Slice::make(4);
//! for v in [3.0, 1.0, 2.0] {
//!     values.push(v);
//! }
//! let indices = sort_indices(&values, f64::total_cmp);
//! assert_eq!(indices, [1, 2, 0]);
//!
//! assert_eq!(search_sorted_indices(&values, &indices, &2.0, f64::total_cmp), Ok(1));
//! assert_eq!(sorted_index_search(&values, &indices, &9.0, f64::total_cmp), -4);
//! ```

use std::cmp::Ordering;

use allocator_api2::alloc::Allocator;

use crate::error::{fatal, SliceError};
use crate::Slice;

/// Binary searches `indices` for `target`, comparing against `values[indices[mid]]`.
///
/// Returns `Ok(k)` if `values[indices[k]]` compares equal to `target`, or
/// `Err(p)` with the position in `indices` where `target`'s index would be
/// inserted to keep the order.
///
/// `compare(target, value)` must return how `target` orders relative to
/// `value`. When several values compare equal, any of their positions may be
/// returned: the search stops at the first match it probes.
///
/// # Panics
///
/// Panics if a probed entry of `indices` is not a live index of `values`.
#[track_caller]
pub fn search_sorted_indices<T, A, B, F>(
    values: &Slice<'_, T, A>,
    indices: &Slice<'_, usize, B>,
    target: &T,
    mut compare: F,
) -> Result<usize, usize>
where
    T: Copy,
    A: Allocator,
    B: Allocator,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut left = 0;
    let mut right = indices.len();

    while left < right {
        let mid = left + (right - left) / 2;
        let value = values.at(indices.at(mid));
        match compare(target, &value) {
            Ordering::Greater => left = mid + 1,
            Ordering::Less => right = mid,
            Ordering::Equal => return Ok(mid),
        }
    }
    Err(left)
}

/// Binary searches `indices` for `target`, encoding the result in one integer.
///
/// Returns `k >= 0` when found at position `k`, and `-(p + 1)` when not
/// found, where `p` is the insertion point. [`insertion_point`] decodes
/// the negative form.
///
/// # Example
///
/// ```
/// use bounded_slice::{sorted_index_search, Slice};
///
/// let mut values: Slice<f64> = Slice::make(3);
/// let mut indices: Slice<usize> = Slice::make(3);
/// for (i, v) in [1.0, 2.0, 3.0].into_iter().enumerate() {
///     values.push(v);
///     indices.push(i);
/// }
/// let cmp = |a: &f64, b: &f64| a.total_cmp(b);
///
/// assert_eq!(sorted_index_search(&values, &indices, &1.0, cmp), 0);
/// assert_eq!(sorted_index_search(&values, &indices, &3.0, cmp), 2);
/// assert_eq!(sorted_index_search(&values, &indices, &0.0, cmp), -1);
/// assert_eq!(sorted_index_search(&values, &indices, &4.0, cmp), -4);
/// ```
#[track_caller]
pub fn sorted_index_search<T, A, B, F>(
    values: &Slice<'_, T, A>,
    indices: &Slice<'_, usize, B>,
    target: &T,
    compare: F,
) -> isize
where
    T: Copy,
    A: Allocator,
    B: Allocator,
    F: FnMut(&T, &T) -> Ordering,
{
    // A slice never holds more than isize::MAX elements, so neither cast wraps.
    match search_sorted_indices(values, indices, target, compare) {
        Ok(found) => found as isize,
        Err(point) => -(point as isize) - 1,
    }
}

/// Decodes the insertion point from a negative [`sorted_index_search`] result.
///
/// Returns `None` for a non-negative (found) result.
#[inline]
pub const fn insertion_point(encoded: isize) -> Option<usize> {
    if encoded < 0 {
        Some((-(encoded + 1)) as usize)
    } else {
        None
    }
}

/// Builds the sorted index array for the live elements of `values`.
///
/// The result is a new owning slice whose length and capacity are
/// `values.len()`. Equal values keep their original relative order.
pub fn sort_indices<T, A, F>(values: &Slice<'_, T, A>, mut compare: F) -> Slice<'static, usize>
where
    T: Copy,
    A: Allocator,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut indices = Slice::make(values.len());
    for i in 0..values.len() {
        indices.push(i);
    }
    if let Some(order) = indices.as_mut_slice() {
        order.sort_by(|&a, &b| compare(&values.at(a), &values.at(b)));
    }
    indices
}

/// Pushes `value` onto `values` and records its index in `indices`, keeping
/// `indices` sorted. Returns the position in `indices` the new index took.
///
/// # Panics
///
/// Panics if either slice is at capacity.
#[track_caller]
pub fn insert_sorted<T, A, B, F>(
    values: &mut Slice<'_, T, A>,
    indices: &mut Slice<'_, usize, B>,
    value: T,
    compare: F,
) -> usize
where
    T: Copy,
    A: Allocator,
    B: Allocator,
    F: FnMut(&T, &T) -> Ordering,
{
    match try_insert_sorted(values, indices, value, compare) {
        Ok(position) => position,
        Err(err) => fatal(err),
    }
}

/// Like [`insert_sorted`], but reports a full slice instead of panicking.
///
/// Neither slice changes on error.
pub fn try_insert_sorted<T, A, B, F>(
    values: &mut Slice<'_, T, A>,
    indices: &mut Slice<'_, usize, B>,
    value: T,
    compare: F,
) -> Result<usize, SliceError>
where
    T: Copy,
    A: Allocator,
    B: Allocator,
    F: FnMut(&T, &T) -> Ordering,
{
    if values.remaining() == 0 {
        return Err(SliceError::capacity_exceeded(
            values.len() + 1,
            values.capacity(),
        ));
    }
    if indices.remaining() == 0 {
        return Err(SliceError::capacity_exceeded(
            indices.len() + 1,
            indices.capacity(),
        ));
    }

    let position = match search_sorted_indices(values, indices, &value, compare) {
        Ok(found) => found,
        Err(point) => point,
    };
    values.try_push(value)?;
    indices.try_insert(position, values.len() - 1)?;
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp_f64(a: &f64, b: &f64) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }

    fn setup(values_in: &[f64]) -> (Slice<'static, f64>, Slice<'static, usize>) {
        let mut values = Slice::make(10);
        let mut indices = Slice::make(3.max(values_in.len()));
        for (i, &v) in values_in.iter().enumerate() {
            values.push(v);
            indices.push(i);
        }
        (values, indices)
    }

    #[test]
    fn test_found_and_missing() {
        let (a, b) = setup(&[1.0, 2.0, 3.0]);
        assert_eq!(sorted_index_search(&a, &b, &1.0, cmp_f64), 0);
        assert_eq!(sorted_index_search(&a, &b, &2.0, cmp_f64), 1);
        assert_eq!(sorted_index_search(&a, &b, &3.0, cmp_f64), 2);
        assert_eq!(sorted_index_search(&a, &b, &0.0, cmp_f64), -1);
        assert_eq!(sorted_index_search(&a, &b, &4.0, cmp_f64), -4);
        assert_eq!(sorted_index_search(&a, &b, &2.5, cmp_f64), -3);
    }

    #[test]
    fn test_empty_index() {
        let values: Slice<f64> = Slice::make(2);
        let indices: Slice<usize> = Slice::make(2);
        assert_eq!(search_sorted_indices(&values, &indices, &1.0, cmp_f64), Err(0));
    }

    #[test]
    fn test_insertion_point() {
        assert_eq!(insertion_point(-1), Some(0));
        assert_eq!(insertion_point(-4), Some(3));
        assert_eq!(insertion_point(0), None);
        assert_eq!(insertion_point(7), None);
    }

    #[test]
    fn test_searches_through_permutation() {
        let mut values: Slice<i32> = Slice::make(5);
        for v in [50, 10, 40, 20, 30] {
            values.push(v);
        }
        let indices = sort_indices(&values, i32::cmp);
        assert_eq!(indices, [1, 3, 4, 2, 0]);
        assert_eq!(search_sorted_indices(&values, &indices, &40, i32::cmp), Ok(3));
        assert_eq!(search_sorted_indices(&values, &indices, &35, i32::cmp), Err(3));
        assert_eq!(values, [50, 10, 40, 20, 30]);
    }

    #[test]
    fn test_duplicates_return_some_match() {
        let mut values: Slice<i32> = Slice::make(5);
        for v in [7, 7, 7, 7, 7] {
            values.push(v);
        }
        let indices = sort_indices(&values, i32::cmp);
        // The first probe is the midpoint, which already matches.
        assert_eq!(search_sorted_indices(&values, &indices, &7, i32::cmp), Ok(2));
    }

    #[test]
    fn test_insert_sorted_keeps_order() {
        let mut values: Slice<i32> = Slice::make(6);
        let mut indices: Slice<usize> = Slice::make(6);
        for v in [30, 10, 20, 50, 40] {
            insert_sorted(&mut values, &mut indices, v, i32::cmp);
        }
        assert_eq!(values, [30, 10, 20, 50, 40]);
        let ordered: Vec<i32> = indices.iter().map(|i| values.at(i)).collect();
        assert_eq!(ordered, [10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_try_insert_sorted_full() {
        let mut values: Slice<i32> = Slice::make(2);
        let mut indices: Slice<usize> = Slice::make(1);
        assert_eq!(try_insert_sorted(&mut values, &mut indices, 5, i32::cmp), Ok(0));
        assert_eq!(
            try_insert_sorted(&mut values, &mut indices, 6, i32::cmp),
            Err(SliceError::capacity_exceeded(2, 1))
        );
        assert_eq!(values, [5]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_stale_index_panics() {
        let mut values: Slice<i32> = Slice::make(2);
        values.push(1);
        let mut indices: Slice<usize> = Slice::make(1);
        indices.push(4);
        let _ = search_sorted_indices(&values, &indices, &1, i32::cmp);
    }
}
