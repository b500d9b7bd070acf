use crate::models::Permission;
use error_common::{SecurityError, SecurityErrorCode};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Raised by [`crate::PermissionEngine::require_permission`], the only
/// operation that turns a negative check into a failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub struct PermissionDenied {
    pub user_id: String,
    pub required: Permission,
    pub resource: Option<String>,
}

impl fmt::Display for PermissionDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self.resource.as_deref().unwrap_or(&self.required.resource);
        write!(f, "Permission denied: {} on {}", self.required.action, target)
    }
}

impl PermissionDenied {
    #[must_use]
    pub fn code(&self) -> SecurityErrorCode {
        SecurityErrorCode::PermissionDenied
    }
}

impl From<PermissionDenied> for SecurityError {
    fn from(err: PermissionDenied) -> Self {
        SecurityError::permission_denied(err.to_string()).with_details(json!({
            "userId": err.user_id,
            "requiredPermission": err.required,
            "resource": err.resource,
        }))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePermissionError {
    #[error("Malformed permission string: {0}")]
    Malformed(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown scope: {0}")]
    UnknownScope(String),
}

pub type Result<T> = std::result::Result<T, PermissionDenied>;
