//! Scoped permission engine for the Inkwell authorization layer
//!
//! Decides whether an (already authenticated) user may act on a resource.
//! Permissions are flat, enumerable grants; there is no policy language.
//!
//! # Core Concepts
//!
//! - **Permission**: `{resource, action, scope?}`, used both as a grant and as a requirement
//! - **Action**: one of `create`, `read`, `update`, `delete`, `execute`, `configure`
//! - **Scope**: `own` ⊂ `project` ⊂ `global`; a wider grant covers a narrower requirement
//! - **User**: identity record owned by the authentication layer; inactive users hold nothing
//!
//! # Example
//!
//! ```rust
//! use auth_permissions::{Action, Permission, PermissionEngine, Scope, User};
//!
//! let engine = PermissionEngine::new();
//! let user = User::new("u-1", "ada@example.com")
//!     .with_permission(Permission::scoped("docs", Action::Update, Scope::Project));
//!
//! // A project grant covers an own-scope requirement...
//! assert!(engine.has_permission(&user, &Permission::scoped("docs", Action::Update, Scope::Own)));
//! // ...but not the other way round.
//! assert!(!engine.has_permission(&user, &Permission::scoped("docs", Action::Update, Scope::Global)));
//!
//! let err = engine
//!     .require_permission(&user, &Permission::scoped("docs", Action::Delete, Scope::Own), Some("doc-1"))
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "Permission denied: delete on doc-1");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing))]

pub mod check;
pub mod engine;
pub mod error;
pub mod models;

pub use engine::*;
pub use error::*;
pub use models::*;
