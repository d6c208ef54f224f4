//! Custom error types for gstr-ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::distribution::ValidationError;
use crate::models::purchase::PurchaseValidationError;

/// The main error type for gstr-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Distribution request validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Purchase invoice validation errors
    #[error("Invalid purchase: {0}")]
    Purchase(#[from] PurchaseValidationError),

    /// Totals that do not fit in a money amount
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Run journal errors
    #[error("Journal error: {0}")]
    Journal(String),
}

impl LedgerError {
    /// Create a "not found" error for purchase invoices
    pub fn invoice_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Invoice",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (distribution or purchase)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Purchase(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for gstr-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::invoice_not_found("inv-550e8400");
        assert_eq!(err.to_string(), "Invoice not found: inv-550e8400");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_error_wraps() {
        let err: LedgerError = ValidationError::NonPositiveAmount.into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: Total amount must be greater than zero"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
