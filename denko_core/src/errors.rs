//! # Error Types
//!
//! Structured error types for denko_core. Two layers:
//!
//! - [`ValidationError`] / [`ValidationErrors`] - per-field input problems the
//!   user can fix by editing the form. A full-form pass collects every field
//!   error at once.
//! - [`CalcError`] - everything a caller of the library can receive,
//!   including a wrapped validation set, unknown identifiers and preference
//!   file failures.
//!
//! ## Example
//!
//! ```rust
//! use denko_core::errors::{CalcError, ValidationError, ValidationErrorKind};
//! use denko_core::validation::Field;
//!
//! let err = ValidationError::new(Field::Length, ValidationErrorKind::EmptyInput);
//! assert_eq!(err.kind, ValidationErrorKind::EmptyInput);
//!
//! let calc: CalcError = err.into();
//! assert_eq!(calc.error_code(), "VALIDATION_FAILED");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::Field;

/// Result type alias for denko_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Blank or whitespace-only input for a required field
    EmptyInput,
    /// Not a finite number, or a number ≤ 0
    NotPositive,
    /// Outside the field's allowed range (reduction factor, power factor)
    OutOfRange,
    /// MCB rating larger than the upstream breaker rating
    ExceedsBreaker,
}

impl ValidationErrorKind {
    /// Short code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::EmptyInput => "EMPTY_INPUT",
            ValidationErrorKind::NotPositive => "NOT_POSITIVE",
            ValidationErrorKind::OutOfRange => "OUT_OF_RANGE",
            ValidationErrorKind::ExceedsBreaker => "EXCEEDS_BREAKER",
        }
    }
}

/// A rejected form field.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// The field that failed
    pub field: Field,
    /// Failure category
    pub kind: ValidationErrorKind,
    /// User-facing message
    pub message: String,
}

impl ValidationError {
    /// Create an error with the default message for `kind` on `field`.
    pub fn new(field: Field, kind: ValidationErrorKind) -> Self {
        let message = match kind {
            ValidationErrorKind::EmptyInput => format!("Enter the {}", field.prompt_name()),
            ValidationErrorKind::NotPositive => "Enter a positive number".to_string(),
            ValidationErrorKind::OutOfRange => match field.range_description() {
                Some(range) => format!("Must be within {}", range),
                None => "Value is out of range".to_string(),
            },
            ValidationErrorKind::ExceedsBreaker => {
                "MCB rating must not exceed the breaker rating".to_string()
            }
        };
        ValidationError { field, kind, message }
    }

    /// Create an error with a specific message.
    pub fn with_message(field: Field, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        ValidationError {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// The set of field errors from one validation pass.
///
/// At most one error per field. Empty if and only if the form can be
/// submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error, replacing any earlier error on the same field.
    pub fn insert(&mut self, error: ValidationError) {
        self.errors.insert(error.field, error);
    }

    /// Drop the error on `field`, if any.
    pub fn clear(&mut self, field: Field) -> Option<ValidationError> {
        self.errors.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Errors in field order
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values()
    }

    /// `Ok(())` if empty, otherwise the set wrapped in [`CalcError::Validation`]
    pub fn into_result(self) -> CalcResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CalcError::Validation { errors: self })
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut errors = ValidationErrors::new();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by UI layers and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// One or more form fields were rejected
    #[error("Invalid input: {errors}")]
    Validation { errors: ValidationErrors },

    /// A circuit, supply, gauge or conduit identifier did not match any table entry
    #[error("Unknown {kind}: '{value}'")]
    UnknownIdentifier { kind: String, value: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
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

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an UnknownIdentifier error
    pub fn unknown_identifier(kind: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::UnknownIdentifier {
            kind: kind.into(),
            value: value.into(),
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

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// Validation failures are fixed by the user re-entering values
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::Validation { .. } | CalcError::UnknownIdentifier { .. })
    }

    /// The validation set, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            CalcError::Validation { errors } => Some(errors),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Validation { .. } => "VALIDATION_FAILED",
            CalcError::UnknownIdentifier { .. } => "UNKNOWN_IDENTIFIER",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationError> for CalcError {
    fn from(error: ValidationError) -> Self {
        CalcError::Validation {
            errors: std::iter::once(error).collect(),
        }
    }
}

impl From<ValidationErrors> for CalcError {
    fn from(errors: ValidationErrors) -> Self {
        CalcError::Validation { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::unknown_identifier("circuit type", "four_phase");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"UnknownIdentifier\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
        assert_eq!(
            CalcError::unknown_identifier("gauge", "7mm").error_code(),
            "UNKNOWN_IDENTIFIER"
        );
        assert_eq!(ValidationErrorKind::ExceedsBreaker.code(), "EXCEEDS_BREAKER");
    }

    #[test]
    fn test_one_error_per_field() {
        let mut errors = ValidationErrors::new();
        errors.insert(ValidationError::new(Field::Length, ValidationErrorKind::EmptyInput));
        errors.insert(ValidationError::new(Field::Length, ValidationErrorKind::NotPositive));
        errors.insert(ValidationError::new(Field::Current, ValidationErrorKind::NotPositive));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Length).unwrap().kind, ValidationErrorKind::NotPositive);

        errors.clear(Field::Length);
        assert!(!errors.contains(Field::Length));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_empty_set_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_validation_error_is_recoverable() {
        let err: CalcError =
            ValidationError::new(Field::PowerFactor, ValidationErrorKind::OutOfRange).into();
        assert!(err.is_recoverable());
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(1));
        assert!(!CalcError::serialization("x").is_recoverable());
    }

    #[test]
    fn test_default_messages() {
        let err = ValidationError::new(Field::ReductionFactor, ValidationErrorKind::OutOfRange);
        assert!(err.message.contains("0.1"));
        let err = ValidationError::new(Field::Length, ValidationErrorKind::EmptyInput);
        assert_eq!(err.message, "Enter the wire length");
    }
}
