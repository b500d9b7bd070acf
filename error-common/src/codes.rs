// Error codes for the authorization boundary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable code carried by every [`crate::SecurityError`].
///
/// Only [`SecurityErrorCode::PermissionDenied`] and
/// [`SecurityErrorCode::InvalidInput`] are raised by the permission engine and
/// the input pipeline. The remaining codes are reserved for collaborating
/// subsystems (plugin sandbox, authentication, rate limiting) so that every
/// caller sees a single taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityErrorCode {
    PermissionDenied,
    InvalidInput,
    SandboxViolation,
    AuthenticationRequired,
    RateLimitExceeded,
}

impl SecurityErrorCode {
    pub const ALL: [SecurityErrorCode; 5] = [
        SecurityErrorCode::PermissionDenied,
        SecurityErrorCode::InvalidInput,
        SecurityErrorCode::SandboxViolation,
        SecurityErrorCode::AuthenticationRequired,
        SecurityErrorCode::RateLimitExceeded,
    ];

    /// Wire representation, identical to the serde form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::InvalidInput => "INVALID_INPUT",
            Self::SandboxViolation => "SANDBOX_VIOLATION",
            Self::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
        }
    }

    /// Expected, user-facing outcomes as opposed to failures of a collaborator.
    #[must_use]
    pub fn is_client_error(self) -> bool {
        matches!(self, Self::PermissionDenied | Self::InvalidInput)
    }
}

impl fmt::Display for SecurityErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
