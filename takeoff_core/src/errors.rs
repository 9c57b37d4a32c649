//! # Error Types
//!
//! Structured error types for takeoff_core. The derivation engine itself
//! cannot fail on a validated [`BuildingParameters`](crate::parameters::BuildingParameters);
//! these errors belong to the collaborators around it (validation, export,
//! template rendering).
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{TakeoffError, TakeoffResult};
//!
//! fn check_length(length_m: f64) -> TakeoffResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(TakeoffError::invalid_input(
//!             "length",
//!             length_m.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_length(-2.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type TakeoffResult<T> = Result<T, TakeoffError>;

/// Structured error type for everything outside the pure engine.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TakeoffError {
    /// An input value is invalid (negative, non-finite, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A field required by the selected mode is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A mode selector holds a value outside its closed set
    #[error("Invalid choice for '{field}': '{value}' (expected one of {expected})")]
    InvalidChoice {
        field: String,
        value: String,
        expected: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML/CSV serialization or parsing error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Export schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Template placeholder could not be rendered
    #[error("Template error at '{token}': {reason}")]
    TemplateError { token: String, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TakeoffError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        TakeoffError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidChoice error
    pub fn invalid_choice(field: impl Into<String>, value: impl Into<String>, expected: impl Into<String>) -> Self {
        TakeoffError::InvalidChoice {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        TakeoffError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a TemplateError
    pub fn template(token: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::TemplateError {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the supplied parameters rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TakeoffError::InvalidInput { .. }
                | TakeoffError::MissingField { .. }
                | TakeoffError::InvalidChoice { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TakeoffError::InvalidInput { .. } => "INVALID_INPUT",
            TakeoffError::MissingField { .. } => "MISSING_FIELD",
            TakeoffError::InvalidChoice { .. } => "INVALID_CHOICE",
            TakeoffError::FileError { .. } => "FILE_ERROR",
            TakeoffError::SerializationError { .. } => "SERIALIZATION_ERROR",
            TakeoffError::VersionMismatch { .. } => "VERSION_MISMATCH",
            TakeoffError::TemplateError { .. } => "TEMPLATE_ERROR",
            TakeoffError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
