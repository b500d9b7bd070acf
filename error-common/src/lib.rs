//! Common error currency for the Inkwell authorization layer
//!
//! Every failure that leaves the permission engine, the input pipeline or the
//! authorization gate is normalized into a [`SecurityError`]: a human-readable
//! message, a machine-readable [`SecurityErrorCode`] and optional structured
//! details.
//!
//! # Error Codes
//!
//! - **PERMISSION_DENIED**: authorization refused (expected, user-facing)
//! - **INVALID_INPUT**: schema or sanitization rejection
//! - **SANDBOX_VIOLATION**: reserved for the plugin host
//! - **AUTHENTICATION_REQUIRED**: reserved for the identity layer
//! - **RATE_LIMIT_EXCEEDED**: reserved for request throttling
//!
//! # Example
//!
//! ```rust
//! use error_common::{SecurityError, SecurityErrorCode};
//! use serde_json::json;
//!
//! let err = SecurityError::invalid_input("Input validation failed")
//!     .with_details(json!({ "issues": [{ "path": "title", "message": "required" }] }));
//!
//! assert_eq!(err.code(), SecurityErrorCode::InvalidInput);
//! assert!(err.detail("issues").is_some());
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing))]

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
