//! Schema error types

use std::fmt;

use thiserror::Error;

/// One failed check against the Record shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path, `$root` for the document itself
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// What was found instead
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Schema errors
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// The document does not match the Record shape
    #[error("Record validation failed: {}", join_issues(.0))]
    ValidationFailed(Vec<ValidationDetails>),
}

impl SchemaError {
    pub fn issues(&self) -> &[ValidationDetails] {
        match self {
            SchemaError::ValidationFailed(issues) => issues,
        }
    }
}

fn join_issues(issues: &[ValidationDetails]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
