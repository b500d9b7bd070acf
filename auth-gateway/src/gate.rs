use crate::state::Authorization;
use auth_permissions::{Permission, PermissionEngine, User};
use error_common::SecurityError;
use input_guard::{GuardConfig, InputGuard, Schema};
use serde_json::{json, Value};
use tracing::{debug, instrument};

/// Single entry point deciding whether a user's action may proceed.
///
/// Runs the permission check first and input validation second, stopping at
/// the first failure. The gate holds no per-request state and can be shared
/// across threads.
#[derive(Debug, Default)]
pub struct AuthorizationGate {
    engine: PermissionEngine,
    guard: InputGuard,
}

impl AuthorizationGate {
    pub fn new(engine: PermissionEngine, guard: InputGuard) -> Self {
        Self { engine, guard }
    }

    /// Gate with the input pipeline configured from `INPUT_GUARD_*` variables
    pub fn from_env() -> Self {
        Self::with_config(GuardConfig::from_env())
    }

    pub fn with_config(config: GuardConfig) -> Self {
        Self::new(PermissionEngine::new(), InputGuard::new(config))
    }

    pub fn engine(&self) -> &PermissionEngine {
        &self.engine
    }

    pub fn guard(&self) -> &InputGuard {
        &self.guard
    }

    /// Authorize `user` for an action needing any one of `required`, and
    /// clean the submitted payload as `T`.
    ///
    /// An empty `required` list means the action is unrestricted. Without
    /// `data` a successful check yields `Authorized(None)`.
    #[instrument(
        level = "debug",
        skip(self, user, required, data),
        fields(user_id = %user.id, required = required.len(), with_data = data.is_some())
    )]
    pub fn authorize<T: Schema>(&self, user: &User, required: &[Permission], data: Option<&Value>) -> Authorization<T> {
        let mut authorization = Authorization::new();
        authorization.begin();

        if let Err(error) = self.authorize_permissions(user, required) {
            return authorization.deny(error);
        }

        let Some(data) = data else {
            debug!("Authorized without payload");
            return authorization.grant(None);
        };

        match self.guard.validate_and_sanitize::<T>(data) {
            Ok(clean) => {
                debug!("Authorized with validated payload");
                authorization.grant(Some(clean))
            }
            Err(error) => {
                debug!(error = %error, "Payload rejected");
                authorization.deny(error.into())
            }
        }
    }

    /// Permission half of [`authorize`](Self::authorize), for actions that
    /// carry no payload.
    ///
    /// # Errors
    ///
    /// `PERMISSION_DENIED` with details `{userId, requiredPermissions}` when
    /// the user holds none of `required`.
    pub fn authorize_permissions(&self, user: &User, required: &[Permission]) -> Result<(), SecurityError> {
        if required.is_empty() || self.engine.has_any_permission(user, required) {
            return Ok(());
        }

        debug!(user_id = %user.id, active = user.is_active, "Denied: no matching permission");
        Err(
            SecurityError::permission_denied(format!("User {} lacks the required permissions", user.id))
                .with_details(json!({
                    "userId": user.id,
                    "requiredPermissions": required,
                })),
        )
    }
}
