//! Core error type.
//!
//! Every variant describes a rejected input.  The value that was in place
//! before the rejected call is always left untouched.

use thiserror::Error;

/// The error type for `ising-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("lattice side length must be positive, got {0}")]
    InvalidSize(usize),

    #[error("site array holds {got} values, expected {expected}")]
    SiteCount { expected: usize, got: usize },

    #[error("temperature must be finite and > 0, got {0}")]
    InvalidTemperature(f64),

    #[error("external field must be finite, got {0}")]
    InvalidField(f64),

    #[error("steps per frame must be >= 1, got {0}")]
    InvalidStepsPerFrame(usize),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `ising-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
