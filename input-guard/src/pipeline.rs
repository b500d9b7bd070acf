use crate::config::GuardConfig;
use crate::error::{GuardError, Result, SanitizeError, ValidationFailure};
use crate::sanitizer::HtmlSanitizer;
use crate::validation::{self, Schema};
use serde_json::Value;
use tracing::{debug, trace};

/// Top-level string fields treated as markup and sanitized after validation.
pub const HTML_FIELDS: &[&str] = &["content", "description", "notes", "html"];

/// Validation and sanitization pipeline for untrusted input
#[derive(Debug)]
pub struct InputGuard {
    sanitizer: HtmlSanitizer,
    config: GuardConfig,
}

impl InputGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self {
            sanitizer: HtmlSanitizer::new(&config),
            config,
        }
    }

    /// Build from `INPUT_GUARD_*` environment variables
    pub fn from_env() -> Self {
        Self::new(GuardConfig::from_env())
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Check `data` against the schema `T`.
    ///
    /// # Errors
    ///
    /// [`ValidationFailure`] listing every issue found.
    pub fn validate<T: Schema>(&self, data: &Value) -> std::result::Result<T, ValidationFailure> {
        validation::validate(data)
    }

    /// Reduce markup to the allowed subset.
    ///
    /// # Errors
    ///
    /// [`SanitizeError`] for oversized or non-text content.
    pub fn sanitize_html(&self, content: &str) -> std::result::Result<String, SanitizeError> {
        self.sanitizer.sanitize(content)
    }

    /// Validate `data` as `T`, then sanitize its markup fields.
    ///
    /// Sanitization runs only on a value that passed validation, and only on
    /// the top-level string fields named in [`HTML_FIELDS`]. Nested values and
    /// every other field are returned exactly as validated. Sanitizing can
    /// lengthen markup (entity escaping, added `rel`), so the rebuilt value is
    /// checked against the schema constraints again.
    ///
    /// # Errors
    ///
    /// [`GuardError::Validation`] when `data` does not fit the schema, before
    /// or after sanitizing; [`GuardError::Sanitization`] when a markup field is
    /// rejected.
    pub fn validate_and_sanitize<T: Schema>(&self, data: &Value) -> Result<T> {
        let validated: T = self.validate(data)?;

        let mut encoded = serde_json::to_value(&validated)?;
        let Value::Object(fields) = &mut encoded else {
            return Ok(validated);
        };

        let mut sanitized = 0usize;
        for name in HTML_FIELDS {
            if let Some(Value::String(markup)) = fields.get_mut(*name) {
                let clean = self.sanitizer.sanitize(markup).map_err(|source| {
                    debug!(field = *name, "Markup field rejected by sanitizer");
                    GuardError::Sanitization {
                        field: Some((*name).to_string()),
                        source,
                    }
                })?;
                *markup = clean;
                sanitized += 1;
            }
        }

        if sanitized == 0 {
            return Ok(validated);
        }

        trace!(fields = sanitized, "Rebuilding payload from sanitized fields");
        let clean: T = serde_json::from_value(encoded)?;
        validation::check_constraints(&clean, data)?;
        Ok(clean)
    }
}

impl Default for InputGuard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use validator::Validate;

    #[derive(Debug, PartialEq, Serialize, Deserialize, Validate)]
    struct Note {
        #[validate(length(min = 1))]
        title: String,
        notes: String,
        html: Option<String>,
        extra: Inner,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize, Validate)]
    struct Inner {
        content: String,
    }

    #[test]
    fn test_only_top_level_markup_fields_sanitized() {
        let guard = InputGuard::default();
        let note: Note = guard
            .validate_and_sanitize(&json!({
                "title": "<b>kept</b>",
                "notes": "<p onclick=\"x()\">n</p>",
                "html": null,
                "extra": { "content": "<script>nested</script>" }
            }))
            .unwrap();

        assert_eq!(note.title, "<b>kept</b>");
        assert_eq!(note.notes, "<p>n</p>");
        assert_eq!(note.html, None);
        assert_eq!(note.extra.content, "<script>nested</script>");
    }

    #[test]
    fn test_validation_runs_before_sanitization() {
        let guard = InputGuard::new(GuardConfig {
            max_input_bytes: 1,
            preview_chars: 10,
        });
        let err = guard
            .validate_and_sanitize::<Note>(&json!({ "title": "", "notes": "far too long" , "extra": { "content": "" } }))
            .unwrap_err();
        assert!(matches!(err, GuardError::Validation(_)));
    }

    #[test]
    fn test_sanitizer_failure_names_the_field() {
        let guard = InputGuard::new(GuardConfig {
            max_input_bytes: 8,
            preview_chars: 3,
        });
        let err = guard
            .validate_and_sanitize::<Note>(&json!({
                "title": "t",
                "notes": "<p>long enough</p>",
                "extra": { "content": "" }
            }))
            .unwrap_err();

        match err {
            GuardError::Sanitization { field, source } => {
                assert_eq!(field.as_deref(), Some("notes"));
                assert_eq!(source.preview(), "<p>...");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[derive(Debug, Serialize, Deserialize, Validate)]
    struct Snippet {
        #[validate(length(max = 10))]
        content: String,
    }

    #[test]
    fn test_sanitized_value_rechecked_against_constraints() {
        let guard = InputGuard::default();

        let err = guard
            .validate_and_sanitize::<Snippet>(&json!({ "content": "a&b&c&d&e" }))
            .unwrap_err();
        let GuardError::Validation(failure) = err else {
            panic!("expected a validation failure");
        };
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].path, "content");
        assert_eq!(failure.issues[0].code, "length");
        assert_eq!(failure.received, json!({ "content": "a&b&c&d&e" }));

        let snippet: Snippet = guard
            .validate_and_sanitize(&json!({ "content": "<b>a</b>" }))
            .unwrap();
        assert_eq!(snippet.content, "<b>a</b>");
    }

    #[test]
    fn test_guard_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InputGuard>();
        assert_send_sync::<HtmlSanitizer>();
    }

    #[test]
    fn test_guard_exposes_config() {
        let guard = InputGuard::default();
        assert_eq!(guard.config(), &GuardConfig::default());
        assert_eq!(guard.sanitize_html("<i>x</i><script></script>").unwrap(), "<i>x</i>");
    }
}
