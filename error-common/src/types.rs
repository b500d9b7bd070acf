use crate::codes::SecurityErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The sole error type crossing the authorization boundary.
///
/// Leaf components keep their own error enums internally and convert into this
/// shape at the edge. `details` holds structured, machine-readable context
/// (field issues, the denied permission, a bounded content preview).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct SecurityError {
    pub message: String,
    pub code: SecurityErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl SecurityError {
    pub fn new(code: SecurityErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            details: None,
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(SecurityErrorCode::PermissionDenied, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(SecurityErrorCode::InvalidInput, message)
    }

    pub fn sandbox_violation(message: impl Into<String>) -> Self {
        Self::new(SecurityErrorCode::SandboxViolation, message)
    }

    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::new(SecurityErrorCode::AuthenticationRequired, message)
    }

    pub fn rate_limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(SecurityErrorCode::RateLimitExceeded, message)
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    #[must_use]
    pub fn code(&self) -> SecurityErrorCode {
        self.code
    }

    /// Looks up a top-level key in `details`.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }
}

/// Result type alias for operations that surface a [`SecurityError`]
pub type Result<T> = std::result::Result<T, SecurityError>;
