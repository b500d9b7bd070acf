//! Input safety pipeline for the Inkwell editor
//!
//! Everything arriving from the UI or from plugins is untrusted. This crate
//! checks it against a declared data contract and strips unsafe markup from
//! the fields that carry HTML.
//!
//! # Pipeline
//!
//! 1. [`validate`]: shape and constraint check, reporting every issue by path
//! 2. [`sanitize_html`]: allow-list HTML cleaning
//! 3. [`validate_and_sanitize`]: both, sanitizing only validated data
//!
//! # Example
//!
//! ```rust
//! use input_guard::schemas::DocumentContent;
//! use serde_json::json;
//!
//! let doc: DocumentContent = input_guard::validate_and_sanitize(&json!({
//!     "id": "doc-1",
//!     "title": "Notes",
//!     "content": "<p onclick=\"steal()\">hello</p><script>alert(1)</script>",
//!     "contentType": "html",
//!     "createdAt": "2024-01-01T00:00:00Z",
//!     "updatedAt": "2024-01-01T00:00:00Z",
//!     "authorId": "u-1"
//! }))
//! .unwrap();
//!
//! assert_eq!(doc.content, "<p>hello</p>");
//! assert_eq!(doc.title, "Notes");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing))]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod sanitizer;
pub mod schemas;
pub mod validation;

pub use config::GuardConfig;
pub use error::{GuardError, SanitizeError, ValidationFailure, ValidationIssue};
pub use pipeline::{InputGuard, HTML_FIELDS};
pub use sanitizer::HtmlSanitizer;
pub use validation::Schema;

use serde_json::Value;

/// Validate `data` against `T`. See [`InputGuard::validate`].
///
/// # Errors
///
/// [`ValidationFailure`] listing every issue found.
pub fn validate<T: Schema>(data: &Value) -> Result<T, ValidationFailure> {
    validation::validate(data)
}

/// Sanitize markup with the default configuration.
///
/// Builds the sanitizer's allow-lists on every call; reuse an
/// [`InputGuard`] or [`HtmlSanitizer`] on hot paths.
///
/// # Errors
///
/// [`SanitizeError`] for oversized or non-text content.
pub fn sanitize_html(content: &str) -> Result<String, SanitizeError> {
    HtmlSanitizer::default().sanitize(content)
}

/// Validate then sanitize with the default configuration.
///
/// Builds a fresh [`InputGuard`] on every call; reuse one on hot paths.
///
/// # Errors
///
/// See [`InputGuard::validate_and_sanitize`].
pub fn validate_and_sanitize<T: Schema>(data: &Value) -> error::Result<T> {
    InputGuard::default().validate_and_sanitize(data)
}
