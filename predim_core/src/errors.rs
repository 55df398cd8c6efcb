//! # Error Types
//!
//! Structured error types for predim_core.
//!
//! Calculators never fail because of data quality: a missing table entry, an
//! ambiguous key or a unit mismatch all degrade to an undefined value plus a
//! [`Warning`](crate::warnings::Warning). The variants below cover the few
//! hard failures left: malformed settings and project file I/O.
//!
//! ## Example
//!
//! ```rust
//! use predim_core::errors::{CalcError, CalcResult};
//!
//! fn validate_oversize(factor: f64) -> CalcResult<()> {
//!     if !(factor > 0.0) {
//!         return Err(CalcError::InvalidInput {
//!             field: "cooling_oversize".to_string(),
//!             value: factor.to_string(),
//!             reason: "Oversize multiplier must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for predim_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for predim_core operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A settings or input value is malformed (negative, not finite, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from anything displayable
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        CalcError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("heating_oversize", "-1.1", "Oversize multiplier must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_input("x", "1", "bad").error_code(), "INVALID_INPUT");
        assert_eq!(CalcError::serialization("bad json").error_code(), "SERIALIZATION_ERROR");
        assert_eq!(
            CalcError::file_locked("a.pdm", "someone", "now").error_code(),
            "FILE_LOCKED"
        );
    }

    #[test]
    fn test_only_lock_errors_are_recoverable() {
        assert!(CalcError::file_locked("a.pdm", "someone", "now").is_recoverable());
        assert!(!CalcError::invalid_input("x", "1", "bad").is_recoverable());
    }
}
