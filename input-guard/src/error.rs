use error_common::{SecurityError, SecurityErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

/// One schema violation: where it happened and what was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path to the offending field (`sandbox.maxMemory`,
    /// `permissions[0].resource`). Empty for the payload root.
    pub path: String,
    /// Machine-readable rule name (`required`, `invalid_type`, `length`, ...)
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Structural or constraint rejection of untrusted data.
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub issues: Vec<ValidationIssue>,
    /// The data exactly as received.
    pub received: Value,
}

impl ValidationFailure {
    pub fn new(issues: Vec<ValidationIssue>, received: Value) -> Self {
        Self { issues, received }
    }

    /// Issue reported for `path`, if any.
    #[must_use]
    pub fn issue_at(&self, path: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|issue| issue.path == path)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input validation failed with {} issue(s)", self.issues.len())?;
        if let Some(first) = self.issues.first() {
            write!(f, ": {first}")?;
        }
        Ok(())
    }
}

/// Markup the sanitizer refused to process.
///
/// Carries only a bounded preview of the input, never the full payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("Content of {length} bytes exceeds the {limit} byte limit")]
    TooLarge {
        length: usize,
        limit: usize,
        preview: String,
    },

    #[error("Content cannot be parsed as markup: {reason}")]
    Malformed {
        reason: String,
        length: usize,
        preview: String,
    },
}

impl SanitizeError {
    #[must_use]
    pub fn preview(&self) -> &str {
        match self {
            Self::TooLarge { preview, .. } | Self::Malformed { preview, .. } => preview,
        }
    }

    #[must_use]
    pub fn length(&self) -> usize {
        match self {
            Self::TooLarge { length, .. } | Self::Malformed { length, .. } => *length,
        }
    }
}

/// Pipeline failure, keeping "structurally invalid" apart from "unsafe
/// content" until it is collapsed into a [`SecurityError`].
#[derive(Error, Debug)]
pub enum GuardError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Field `{}` failed sanitization: {source}", .field.as_deref().unwrap_or("<content>"))]
    Sanitization {
        field: Option<String>,
        #[source]
        source: SanitizeError,
    },

    #[error("Validated payload could not be re-encoded: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl GuardError {
    #[must_use]
    pub fn code(&self) -> SecurityErrorCode {
        SecurityErrorCode::InvalidInput
    }
}

impl From<SanitizeError> for GuardError {
    fn from(source: SanitizeError) -> Self {
        Self::Sanitization { field: None, source }
    }
}

impl From<ValidationFailure> for SecurityError {
    fn from(failure: ValidationFailure) -> Self {
        SecurityError::invalid_input(failure.to_string()).with_details(json!({
            "issues": failure.issues,
            "received": failure.received,
        }))
    }
}

impl From<SanitizeError> for SecurityError {
    fn from(err: SanitizeError) -> Self {
        sanitization_error(None, &err)
    }
}

impl From<GuardError> for SecurityError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Validation(failure) => failure.into(),
            GuardError::Sanitization { field, source } => sanitization_error(field.as_deref(), &source),
            GuardError::Encoding(inner) => SecurityError::invalid_input("Validated payload could not be re-encoded")
                .with_details(json!({ "reason": inner.to_string() })),
        }
    }
}

fn sanitization_error(field: Option<&str>, err: &SanitizeError) -> SecurityError {
    SecurityError::invalid_input(err.to_string()).with_details(json!({
        "field": field,
        "length": err.length(),
        "preview": err.preview(),
    }))
}

pub type Result<T> = std::result::Result<T, GuardError>;
