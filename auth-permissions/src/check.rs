//! Grant matching rules.
//!
//! A granted permission matches a required one when:
//! 1. the resource strings are equal (`"*"` is not expanded here);
//! 2. the actions are equal;
//! 3. the granted scope covers the required scope.
//!
//! Scope comparison is directional. The grant is always tested against the
//! requirement, never the reverse. When either side is unscoped the two match
//! only if both are unscoped, so a missing scope is never read as `global`.

use crate::models::{Permission, Scope};

/// Whether a grant at `granted` covers a requirement at `required`.
#[must_use]
pub fn scope_matches(granted: Option<Scope>, required: Option<Scope>) -> bool {
    match (granted, required) {
        (Some(granted), Some(required)) => granted.satisfies(required),
        (granted, required) => granted == required,
    }
}

/// Whether `granted` satisfies `required`.
#[must_use]
pub fn permission_matches(granted: &Permission, required: &Permission) -> bool {
    granted.resource == required.resource
        && granted.action == required.action
        && scope_matches(granted.scope, required.scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    #[test]
    fn test_scope_matrix() {
        use Scope::{Global, Own, Project};

        let cases = [
            (Some(Global), Some(Global), true),
            (Some(Global), Some(Project), true),
            (Some(Global), Some(Own), true),
            (Some(Project), Some(Global), false),
            (Some(Project), Some(Project), true),
            (Some(Project), Some(Own), true),
            (Some(Own), Some(Global), false),
            (Some(Own), Some(Project), false),
            (Some(Own), Some(Own), true),
            (None, None, true),
            (None, Some(Own), false),
            (None, Some(Global), false),
            (Some(Global), None, false),
            (Some(Own), None, false),
        ];

        for (granted, required, expected) in cases {
            assert_eq!(
                scope_matches(granted, required),
                expected,
                "granted {granted:?} vs required {required:?}"
            );
        }
    }

    #[test]
    fn test_resource_and_action_are_exact() {
        let granted = Permission::scoped("docs", Action::Update, Scope::Global);

        assert!(permission_matches(
            &granted,
            &Permission::scoped("docs", Action::Update, Scope::Own)
        ));
        assert!(!permission_matches(
            &granted,
            &Permission::scoped("documents", Action::Update, Scope::Own)
        ));
        assert!(!permission_matches(
            &granted,
            &Permission::scoped("docs", Action::Read, Scope::Own)
        ));
    }

    #[test]
    fn test_wildcard_grant_is_literal() {
        let wildcard = Permission::scoped("*", Action::Read, Scope::Global);
        assert!(!permission_matches(
            &wildcard,
            &Permission::scoped("docs", Action::Read, Scope::Global)
        ));
        assert!(permission_matches(
            &wildcard,
            &Permission::scoped("*", Action::Read, Scope::Own)
        ));
    }
}
