//! Typed errors for dataset validation and scale construction.
//!
//! I/O and orchestration code returns `anyhow::Result` and wraps these with context.

use thiserror::Error;

/// Reasons a dataset is rejected at load time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("dataset has no records")]
    Empty,
    #[error("record #{index} has an empty name")]
    EmptyName { index: usize },
    #[error("duplicate category name `{0}`")]
    DuplicateName(String),
    #[error("record `{name}` is missing field `{field}`")]
    MissingField { name: String, field: &'static str },
    #[error("record `{name}`: `{field}` must be a finite non-negative {expected}, got {value}")]
    InvalidNumber {
        name: String,
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
}

/// Reasons a scale cannot be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("band scale needs at least one category")]
    EmptyDomain,
    #[error("band padding must be in [0, 1), got {0}")]
    InvalidPadding(f64),
    #[error("scale range bounds must be finite")]
    NonFiniteRange,
}
