//! Error types for configuration and result postprocessing.
//!
//! The alignment core itself is infallible: every pair of byte sequences and
//! every finite scoring produce a (possibly empty) result. Errors only arise
//! when callers hand the crate text to parse (statistic names, comparison
//! operators, filter expressions) or non-finite scoring parameters.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SwError>;

#[derive(Debug, Error)]
pub enum SwError {
    #[error("unknown statistic '{0}'")]
    UnknownStatistic(String),
    #[error("unknown comparison operator '{0}'")]
    UnknownComparison(String),
    #[error("malformed filter expression '{0}', expected <statistic>__<op>=<value>")]
    InvalidFilter(String),
    #[error("filter threshold '{0}' is not a number")]
    InvalidThreshold(String),
    #[error("scoring parameter {name} must be finite, got {value}")]
    InvalidScoring { name: &'static str, value: f64 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
