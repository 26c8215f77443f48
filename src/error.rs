//! Error kinds reported by the checked (`try_`) operations.
//!
//! The unchecked operations panic with the same messages via [`fatal`].

use std::alloc::Layout;

use thiserror::Error;

/// The error type for the checked slice operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SliceError {
    /// A push, insert or put needed more room than the slice has.
    #[error("slice capacity exceeded: {required} elements required, capacity is {capacity}")]
    CapacityExceeded {
        /// Length the operation would have produced.
        required: usize,
        /// Capacity of the slice.
        capacity: usize,
    },
    /// Pop on an empty slice.
    #[error("cannot pop from an empty slice")]
    Underflow,
    /// An index or range fell outside the permitted bound.
    #[error("range {start}..{end} is out of bounds for {bound}")]
    OutOfRange {
        /// First index of the offending range.
        start: usize,
        /// One past the last index of the offending range.
        end: usize,
        /// The bound the range had to stay within.
        bound: usize,
    },
    /// The capacity computation overflowed.
    #[error("memory allocation failed due to capacity overflow")]
    CapacityOverflow,
    /// The allocator returned an error.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// Layout of the failed request.
        layout: Layout,
    },
}

impl SliceError {
    pub(crate) fn out_of_range(start: usize, end: usize, bound: usize) -> Self {
        Self::OutOfRange { start, end, bound }
    }

    pub(crate) fn capacity_exceeded(required: usize, capacity: usize) -> Self {
        Self::CapacityExceeded { required, capacity }
    }
}

/// Aborts the current operation with `err`.
///
/// Violations of the fatal API are programming errors, so they panic rather
/// than return.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn fatal(err: SliceError) -> ! {
    panic!("{err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SliceError::capacity_exceeded(7, 6).to_string(),
            "slice capacity exceeded: 7 elements required, capacity is 6"
        );
        assert_eq!(SliceError::Underflow.to_string(), "cannot pop from an empty slice");
        assert_eq!(
            SliceError::out_of_range(3, 1, 4).to_string(),
            "range 3..1 is out of bounds for 4"
        );
    }

    #[test]
    fn test_alloc_error_reports_bytes() {
        let layout = Layout::array::<u32>(8).unwrap();
        let err = SliceError::AllocError { layout };
        assert_eq!(err.to_string(), "memory allocation of 32 bytes failed");
    }

    #[test]
    #[should_panic(expected = "cannot pop from an empty slice")]
    fn test_fatal_panics_with_message() {
        fatal(SliceError::Underflow);
    }
}
