//! Integration tests for the permission engine
//!
//! These walk through the editor's real roles:
//! 1. Author editing their own documents
//! 2. Project maintainer acting across a project
//! 3. Workspace administrator
//! 4. Deactivated account
//! 5. Plugin host filtering visible documents

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use auth_permissions::{Action, Permission, PermissionEngine, Scope, User};
use error_common::{SecurityError, SecurityErrorCode};
use proptest::prelude::*;
use serde_json::json;
use uuid::Uuid;

fn user_with(permissions: Vec<Permission>) -> User {
    User::new(Uuid::new_v4().to_string(), "someone@example.com").with_permissions(permissions)
}

#[test]
fn test_author_scope_does_not_reach_project() {
    let engine = PermissionEngine::new();
    let author = user_with(vec![Permission::scoped("docs", Action::Update, Scope::Own)]);

    assert!(engine.has_permission(&author, &Permission::scoped("docs", Action::Update, Scope::Own)));
    assert!(
        !engine.has_permission(&author, &Permission::scoped("docs", Action::Update, Scope::Project)),
        "an own-scope grant must not satisfy a project requirement"
    );
}

#[test]
fn test_maintainer_scope_reaches_own() {
    let engine = PermissionEngine::new();
    let maintainer = user_with(vec![Permission::scoped("docs", Action::Update, Scope::Project)]);

    assert!(engine.has_permission(&maintainer, &Permission::scoped("docs", Action::Update, Scope::Own)));
    assert!(engine.has_permission(&maintainer, &Permission::scoped("docs", Action::Update, Scope::Project)));
    assert!(!engine.has_permission(&maintainer, &Permission::scoped("docs", Action::Update, Scope::Global)));
}

#[test]
fn test_global_admin_requires_wildcard_grant() {
    let engine = PermissionEngine::new();

    let admin = user_with(vec![Permission::global_admin()]);
    assert!(engine.is_global_admin(&admin));

    let docs_admin = user_with(vec![Permission::scoped("docs", Action::Configure, Scope::Global)]);
    assert!(!engine.is_global_admin(&docs_admin));

    let project_wildcard = user_with(vec![Permission::scoped("*", Action::Configure, Scope::Project)]);
    assert!(!engine.is_global_admin(&project_wildcard));

    // The wildcard grant is not expanded onto concrete resources.
    assert!(!engine.has_permission(&admin, &Permission::scoped("docs", Action::Configure, Scope::Own)));
}

#[test]
fn test_deactivated_account_loses_everything() {
    let engine = PermissionEngine::new();
    let account = user_with(vec![
        Permission::global_admin(),
        Permission::scoped("docs", Action::Read, Scope::Global),
    ])
    .deactivated();

    assert!(!engine.is_global_admin(&account));
    assert!(!engine.has_permission(&account, &Permission::scoped("docs", Action::Read, Scope::Own)));
    assert!(engine
        .filter_by_permissions(&account, 0..10, "docs", Action::Read)
        .is_empty());
}

#[test]
fn test_require_permission_surfaces_security_error() {
    let engine = PermissionEngine::new();
    let user = User::new("u-100", "reader@example.com")
        .with_permission(Permission::scoped("docs", Action::Read, Scope::Own));
    let required = Permission::scoped("docs", Action::Delete, Scope::Own);

    let outcome: auth_permissions::Result<()> = engine.require_permission(&user, &required, Some("doc-7"));
    let err: SecurityError = outcome.unwrap_err().into();

    assert_eq!(err.code, SecurityErrorCode::PermissionDenied);
    assert_eq!(
        err.details,
        Some(json!({
            "userId": "u-100",
            "requiredPermission": { "resource": "docs", "action": "delete", "scope": "own" },
            "resource": "doc-7"
        }))
    );
}

#[test]
fn test_plugin_host_filters_documents() {
    let engine = PermissionEngine::new();
    let documents: Vec<String> = (0..10).map(|i| format!("doc-{i}")).collect();

    let global_reader = user_with(vec![Permission::scoped("docs", Action::Read, Scope::Global)]);
    let visible = engine.filter_by_permissions(&global_reader, documents.clone(), "docs", Action::Read);
    assert_eq!(visible, documents);

    // Own scope is scope-level only: ownership of each item is not checked here.
    let own_reader = user_with(vec![Permission::scoped("docs", Action::Read, Scope::Own)]);
    let visible = engine.filter_by_permissions(&own_reader, documents.iter(), "docs", Action::Read);
    assert!(visible.len() <= documents.len());
    assert_eq!(engine.effective_scope(&own_reader, "docs", Action::Read), Some(Scope::Own));

    let stranger = user_with(vec![Permission::scoped("notes", Action::Read, Scope::Global)]);
    assert!(engine
        .filter_by_permissions(&stranger, documents.iter(), "docs", Action::Read)
        .is_empty());
}

#[test]
fn test_user_record_round_trips_from_ui_json() {
    let engine = PermissionEngine::new();
    let user: User = serde_json::from_value(json!({
        "id": "u-5",
        "email": "ui@example.com",
        "permissions": [
            { "resource": "plugins", "action": "execute", "scope": "project" }
        ],
        "isActive": true
    }))
    .unwrap();

    assert!(engine.has_permission(&user, &"plugins:execute:own".parse().unwrap()));
    assert_eq!(engine.get_permissions_for_resource(&user, "plugins").len(), 1);
}

// =============================================================================
// Properties
// =============================================================================

fn arb_action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn arb_scope() -> impl Strategy<Value = Scope> {
    prop::sample::select(Scope::BROADEST_FIRST.to_vec())
}

fn arb_permission() -> impl Strategy<Value = Permission> {
    (
        prop_oneof![Just("*".to_string()), "[a-z]{1,8}"],
        arb_action(),
        prop::option::of(arb_scope()),
    )
        .prop_map(|(resource, action, scope)| Permission { resource, action, scope })
}

proptest! {
    #[test]
    fn prop_inactive_users_hold_nothing(
        grants in prop::collection::vec(arb_permission(), 0..12),
        required in arb_permission(),
    ) {
        let engine = PermissionEngine::new();
        let user = user_with(grants).deactivated();
        prop_assert!(!engine.has_permission(&user, &required));
    }

    #[test]
    fn prop_global_grant_covers_every_scope(
        resource in "[a-z]{1,8}",
        action in arb_action(),
        required_scope in arb_scope(),
    ) {
        let engine = PermissionEngine::new();
        let user = user_with(vec![Permission::scoped(resource.clone(), action, Scope::Global)]);
        prop_assert!(engine.has_permission(&user, &Permission::scoped(resource, action, required_scope)));
    }

    #[test]
    fn prop_granted_permission_is_held(grant in arb_permission()) {
        let engine = PermissionEngine::new();
        let user = user_with(vec![grant.clone()]);
        prop_assert!(engine.has_permission(&user, &grant));
    }

    #[test]
    fn prop_filter_is_monotone(
        grants in prop::collection::vec(arb_permission(), 0..6),
        len in 0usize..20,
        action in arb_action(),
    ) {
        let engine = PermissionEngine::new();
        let user = user_with(grants);
        let kept = engine.filter_by_permissions(&user, 0..len, "docs", action);
        prop_assert!(kept.len() <= len);
        prop_assert!(kept.is_empty() || kept.len() == len);
    }
}
