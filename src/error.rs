//! Custom error types for the rateio engine
//!
//! The calculation core is total and never returns these. They cover the
//! boundary: loading configuration and snapshots, and parsing ids and amounts.

use thiserror::Error;

use crate::models::AllocationValidationError;

/// The main error type for rateio operations
#[derive(Error, Debug)]
pub enum RateioError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Input that could not be parsed into a typed value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl RateioError {
    /// Create a "not found" error for sectors
    pub fn sector_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Sector",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for operations
    pub fn operation_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Operation",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for RateioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RateioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<AllocationValidationError> for RateioError {
    fn from(err: AllocationValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for rateio operations
pub type RateioResult<T> = Result<T, RateioError>;
