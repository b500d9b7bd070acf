use crate::{
    check::permission_matches,
    error::{PermissionDenied, Result},
    models::{Action, Permission, Scope, User},
};
use tracing::{debug, trace};

/// Stateless permission engine.
///
/// Holds no data between calls, so a single value can be shared freely
/// across threads or created per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionEngine;

impl PermissionEngine {
    pub fn new() -> Self {
        Self
    }

    // =============================================================================
    // Core Checks
    // =============================================================================

    /// Check if the user holds a grant satisfying `required`.
    ///
    /// Inactive users have no effective permissions.
    #[must_use]
    pub fn has_permission(&self, user: &User, required: &Permission) -> bool {
        if !user.is_active {
            trace!(user_id = %user.id, "Inactive user, permission check short-circuited");
            return false;
        }

        let allowed = user
            .permissions
            .iter()
            .any(|granted| permission_matches(granted, required));

        trace!(user_id = %user.id, required = %required, allowed, "Permission check");
        allowed
    }

    /// True if at least one entry of `required` is held. An empty list holds
    /// nothing; callers that treat "no requirement" as unrestricted must
    /// handle that before calling.
    #[must_use]
    pub fn has_any_permission(&self, user: &User, required: &[Permission]) -> bool {
        required.iter().any(|p| self.has_permission(user, p))
    }

    /// True if every entry of `required` is held. Always false for an
    /// inactive user, even with an empty list.
    #[must_use]
    pub fn has_all_permissions(&self, user: &User, required: &[Permission]) -> bool {
        user.is_active && required.iter().all(|p| self.has_permission(user, p))
    }

    /// Fail with [`PermissionDenied`] unless the user holds `required`.
    ///
    /// `resource` names the concrete object being acted on, when there is one,
    /// and is carried into the error for the caller's benefit.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionDenied`] when [`Self::has_permission`] is false.
    pub fn require_permission(
        &self,
        user: &User,
        required: &Permission,
        resource: Option<&str>,
    ) -> Result<()> {
        if self.has_permission(user, required) {
            return Ok(());
        }

        debug!(
            user_id = %user.id,
            required = %required,
            resource = resource.unwrap_or_default(),
            "Permission requirement not met"
        );
        Err(PermissionDenied {
            user_id: user.id.clone(),
            required: required.clone(),
            resource: resource.map(str::to_string),
        })
    }

    // =============================================================================
    // Scope Probing
    // =============================================================================

    /// Widest scope at which the user holds `action` on `resource`.
    ///
    /// Probes `global`, then `project`, then `own`; the first hit wins.
    #[must_use]
    pub fn effective_scope(&self, user: &User, resource: &str, action: Action) -> Option<Scope> {
        Scope::BROADEST_FIRST
            .into_iter()
            .find(|&scope| self.has_permission(user, &Permission::scoped(resource, action, scope)))
    }

    /// Keep the items the user may act on.
    ///
    /// The user passes if they hold `action` on `resource` at any scope
    /// (see [`Self::effective_scope`]). This only inspects grant scope: an
    /// `own`-scoped grant lets every item through, because items carry no
    /// ownership information here. Restricting an `own` grant to the items
    /// the user actually owns is the caller's responsibility.
    pub fn filter_by_permissions<T, I>(
        &self,
        user: &User,
        items: I,
        resource: &str,
        action: Action,
    ) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let scope = self.effective_scope(user, resource, action);
        debug!(user_id = %user.id, resource, %action, ?scope, "Filtering items by permission");

        items.into_iter().filter(|_| scope.is_some()).collect()
    }

    // =============================================================================
    // Introspection
    // =============================================================================

    /// Grants held on exactly `resource`. Empty for inactive users.
    #[must_use]
    pub fn get_permissions_for_resource<'u>(&self, user: &'u User, resource: &str) -> Vec<&'u Permission> {
        if !user.is_active {
            return Vec::new();
        }

        user.permissions
            .iter()
            .filter(|p| p.resource == resource)
            .collect()
    }

    /// Global administrator check: requires exactly `*:configure:global`.
    #[must_use]
    pub fn is_global_admin(&self, user: &User) -> bool {
        self.has_permission(user, &Permission::global_admin())
    }
}
