//! Core error type.
//!
//! Every variant is a model-correctness bug rather than a transient fault, so
//! callers propagate these to the scheduler loop and end the run.

use thiserror::Error;

/// The top-level error type for `tau-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("condition {condition} returned an invalid propensity contribution: {value}")]
    InvalidPropensity { condition: String, value: f64 },

    #[error("{0} is not a valid simulation time")]
    InvalidTime(f64),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tau-core`.
pub type CoreResult<T> = Result<T, CoreError>;
