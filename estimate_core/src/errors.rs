//! # Error Types
//!
//! Structured error types for estimate_core. Only two conditions are fatal to
//! an estimate (a bad area and a missing project type); everything else in the
//! input is clamped or defaulted. The remaining variants cover pricing tables
//! and saved records.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_area(area: f64) -> EstimateResult<()> {
//!     if !(area.is_finite() && area > 0.0) {
//!         return Err(EstimateError::invalid_area(area, "Area must be a positive number"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_area(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// Area is zero, negative, NaN or infinite
    #[error("Invalid area: {value} - {reason}")]
    InvalidArea { value: String, reason: String },

    /// Project type was not supplied
    #[error("Missing project type: select residential, commercial or mixed-use")]
    MissingProjectType,

    /// Some other input value is structurally invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A pricing table failed validation
    #[error("Invalid pricing table '{table}': {reason}")]
    InvalidPricingTable { table: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Record schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl EstimateError {
    /// Create an InvalidArea error
    pub fn invalid_area(value: f64, reason: impl Into<String>) -> Self {
        EstimateError::InvalidArea {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidPricingTable error
    pub fn invalid_pricing_table(table: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidPricingTable {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        EstimateError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for the errors a form should turn into a field-level prompt
    /// ("enter a valid area", "select a project type").
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            EstimateError::InvalidArea { .. }
                | EstimateError::MissingProjectType
                | EstimateError::InvalidInput { .. }
        )
    }

    /// Name of the input field at fault, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            EstimateError::InvalidArea { .. } => Some("area"),
            EstimateError::MissingProjectType => Some("projectType"),
            EstimateError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidArea { .. } => "INVALID_AREA",
            EstimateError::MissingProjectType => "MISSING_PROJECT_TYPE",
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::InvalidPricingTable { .. } => "INVALID_PRICING_TABLE",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
