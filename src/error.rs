//! Error types for sherman-flow

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a graph, approximator, or running
/// the solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid input data: non-positive epsilon, negative/NaN/infinite
    /// capacity, a demand vector that doesn't sum to zero, or a reference
    /// to a non-existent node.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Dimension mismatch between a demand vector and the graph's node
    /// count, or between a flow vector and the graph's edge count.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        got: usize,
    },

    /// `find_min`/`extract_min` called on an empty Fibonacci heap. This is
    /// a programmer error in the caller (the Nagamochi-Ibaraki routines
    /// never call it on an empty heap); it is never produced by normal use
    /// of the public API.
    #[error("operation on an empty heap")]
    EmptyHeap,

    /// Soft-max evaluated on a vector that overflowed before the shift
    /// stabilization in [`crate::softmax`] could be applied. In practice
    /// this should never surface; see the numeric policy there.
    #[error("numeric overflow in soft-max: {0}")]
    NumericOverflow(String),

    /// The Sherman solver's outer boosting loop exhausted its step budget
    /// without driving the residual demand to zero.
    #[error("did not converge after {iterations} iterations")]
    NoConvergence {
        /// Iterations completed before the budget was exhausted.
        iterations: usize,
    },
}

impl Error {
    /// Create an invalid-input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a dimension-mismatch error.
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { expected, got }
    }

    /// Create a numeric-overflow error.
    pub fn numeric_overflow(msg: impl Into<String>) -> Self {
        Self::NumericOverflow(msg.into())
    }
}
