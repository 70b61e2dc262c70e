//! Error types for schedule derivation and inversion.

use thiserror::Error;

/// A sequence of indices that fails to be a bijection on `0..size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PermutationError {
    #[error("value {value} at position {position} is outside 0..{size}")]
    OutOfRange {
        position: usize,
        value: usize,
        size: usize,
    },

    #[error("value {value} occurs at both position {first} and position {second}")]
    Duplicate {
        value: usize,
        first: usize,
        second: usize,
    },

    #[error("expected {expected} indices, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// Two vectors that cannot be related by a single permutation.
///
/// Happens when the two vectors are not over the same index universe, e.g. when one of them was
/// never moved into the other's byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("value {value} at position {position} does not occur in the previous vector")]
    Missing { position: usize, value: usize },

    #[error("value {value} occurs at both position {first} and position {second} of the previous vector")]
    Ambiguous {
        value: usize,
        first: usize,
        second: usize,
    },

    #[error("value {value} occurs at both position {first} and position {second} of the current vector")]
    Repeated {
        value: usize,
        first: usize,
        second: usize,
    },

    #[error("previous vector has {previous} entries, current vector has {current}")]
    LengthMismatch { previous: usize, current: usize },
}

/// An error tied to a particular step of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A schedule vector is not a bijection. This is a bug in whatever produced it.
    #[error("step {step}: invariant violation")]
    InvariantViolation {
        step: usize,
        #[source]
        source: PermutationError,
    },

    #[error("step {step}: inverse lookup failed")]
    Lookup {
        step: usize,
        #[source]
        source: LookupError,
    },

    #[error("expected {expected} schedule steps, got {actual}")]
    WrongStepCount { expected: usize, actual: usize },
}

/// Result type alias for schedule operations.
pub type ScheduleResult<T> = core::result::Result<T, ScheduleError>;
