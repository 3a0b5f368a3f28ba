//! Error types for the sort core

use std::fmt;

use thiserror::Error;

/// Why a cancellation signal fired
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// `Cancellation::cancel` was called
    Explicit,
    /// The deadline attached to the signal passed
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Explicit => write!(f, "sort cancelled"),
            CancelReason::DeadlineExceeded => write!(f, "sort deadline exceeded"),
        }
    }
}

/// Errors returned by the sort entry points
///
/// Cancellation is the only runtime failure. It is never retried internally
/// and the list is left exactly as the completed accesses made it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("{reason}")]
    Cancelled { reason: CancelReason },
}

impl SortError {
    /// Build a cancellation error with the given reason
    pub fn cancelled(reason: CancelReason) -> Self {
        SortError::Cancelled { reason }
    }

    /// The reason carried by a cancellation
    pub fn reason(&self) -> CancelReason {
        match self {
            SortError::Cancelled { reason } => *reason,
        }
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        self.reason() == CancelReason::DeadlineExceeded
    }
}
