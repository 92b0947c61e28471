//! Error types for row batch operations.

use thiserror::Error;

/// Errors from row batch construction and access.
#[derive(Debug, Error)]
pub enum TabularError {
    /// Structural error (row arity mismatch, geometry field out of range).
    #[error("Schema error: {0}")]
    Schema(String),
}

/// Result type for tabular operations.
pub type Result<T> = std::result::Result<T, TabularError>;
