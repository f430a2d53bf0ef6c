//! Error types for statistics operations.

use thiserror::Error;

/// Unified error type for all `u-stats` operations.
///
/// Every failure is a violated precondition on the inputs; nothing is
/// retried and no partial result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Statistic requested on a zero-length sample.
    #[error("{context}: sample must not be empty")]
    EmptyInput { context: &'static str },

    /// Sample shorter than the estimator requires.
    #[error("{context}: need at least {needed} observations (got {got})")]
    InsufficientData {
        context: &'static str,
        needed: usize,
        got: usize,
    },

    /// Input outside the mathematical domain of the formula.
    #[error("{context}: {reason}")]
    Domain {
        context: &'static str,
        reason: String,
    },

    /// Paired samples of unequal length.
    #[error("{context}: samples must have the same length ({left} vs {right})")]
    LengthMismatch {
        context: &'static str,
        left: usize,
        right: usize,
    },

    /// Draw without replacement larger than the population.
    #[error("cannot draw {requested} values without replacement from {available}")]
    OversizedSample { requested: usize, available: usize },

    /// NaN or infinity in the input.
    #[error("{context}: input contains NaN or infinite values")]
    NonFinite { context: &'static str },

    /// Distribution or fit parameter out of range.
    #[error("{context}: {reason}")]
    InvalidParameter {
        context: &'static str,
        reason: String,
    },

    /// Mean selector string that names no known mean.
    #[error("unknown mean kind: {0:?}")]
    UnknownMeanKind(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StatsError>;
