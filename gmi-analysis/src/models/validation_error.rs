//! Structured validation records
//!
//! The serialized shape is a stable contract for the report assembler:
//! `{error_type, field, message, expected, actual, severity}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// Impossible data; blocks the run
    DataIntegrityError,
    /// Implausible or thin data; attached to the output as a disclaimer
    DataQualityWarning,
}

/// Severity of a validation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

/// One validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_type: IssueKind,
    pub field: String,
    pub message: String,
    pub expected: Value,
    pub actual: Value,
    pub severity: Severity,
}

impl ValidationError {
    /// Critical integrity failure
    pub fn critical(
        field: impl Into<String>,
        message: impl Into<String>,
        expected: impl Into<Value>,
        actual: impl Into<Value>,
    ) -> Self {
        Self {
            error_type: IssueKind::DataIntegrityError,
            field: field.into(),
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
            severity: Severity::Critical,
        }
    }

    /// Non-blocking quality warning
    pub fn warning(
        field: impl Into<String>,
        message: impl Into<String>,
        expected: impl Into<Value>,
        actual: impl Into<Value>,
    ) -> Self {
        Self {
            error_type: IssueKind::DataQualityWarning,
            field: field.into(),
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
