//! Authorization gate for the Inkwell editor
//!
//! Every UI action and plugin call passes through [`AuthorizationGate::authorize`]:
//!
//! 1. The user must hold at least one of the required permissions
//!    (see [`auth_permissions`])
//! 2. Any submitted payload must validate against its schema and is returned
//!    sanitized (see [`input_guard`])
//!
//! The first failure wins and is reported as an [`error_common::SecurityError`];
//! there is no partial authorization.
//!
//! # Example
//!
//! ```rust
//! use auth_gateway::{AuthorizationGate, GateState};
//! use auth_permissions::{Action, Permission, Scope, User};
//! use input_guard::schemas::DocumentContent;
//! use serde_json::json;
//!
//! let gate = AuthorizationGate::default();
//! let user = User::new("u-1", "ada@example.com")
//!     .with_permission(Permission::scoped("docs", Action::Create, Scope::Own));
//!
//! let auth = gate.authorize::<DocumentContent>(
//!     &user,
//!     &[Permission::scoped("docs", Action::Create, Scope::Own)],
//!     Some(&json!({
//!         "id": "doc-1",
//!         "title": "Hello",
//!         "content": "<p>hi</p><script>alert(1)</script>",
//!         "contentType": "html",
//!         "createdAt": "2024-01-01T00:00:00Z",
//!         "updatedAt": "2024-01-01T00:00:00Z",
//!         "authorId": "u-1"
//!     })),
//! );
//!
//! assert!(auth.is_authorized());
//! if let GateState::Authorized(Some(doc)) = auth.state() {
//!     assert_eq!(doc.content, "<p>hi</p>");
//! }
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing))]

pub mod gate;
pub mod state;

pub use gate::AuthorizationGate;
pub use state::{Authorization, GateState};

use auth_permissions::{Permission, User};
use input_guard::Schema;
use serde_json::Value;

/// Authorize with a default gate. See [`AuthorizationGate::authorize`].
///
/// Builds a fresh gate, and with it the sanitizer's allow-lists, on every
/// call. Request handlers should hold one [`AuthorizationGate`] and reuse it.
pub fn authorize<T: Schema>(user: &User, required: &[Permission], data: Option<&Value>) -> Authorization<T> {
    AuthorizationGate::default().authorize(user, required, data)
}
