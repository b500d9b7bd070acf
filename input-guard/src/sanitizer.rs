use crate::config::GuardConfig;
use crate::error::SanitizeError;
use ammonia::{Builder, UrlRelative};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, trace};

const ALLOWED_TAGS: &[&str] = &[
    // Structure and text formatting
    "p", "br", "hr", "div", "span", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "code",
    "b", "i", "strong", "em", "u", "s", "strike", "del", "ins", "sub", "sup", "mark", "small",
    "ul", "ol", "li", "dl", "dt", "dd", "figure", "figcaption",
    // Tables
    "table", "caption", "colgroup", "col", "thead", "tbody", "tfoot", "tr", "th", "td",
    // Links and images
    "a", "img",
];

/// Removed together with everything inside them.
const STRIPPED_WITH_CONTENT: &[&str] = &["script", "style"];

const GENERIC_ATTRIBUTES: &[&str] = &["class", "title", "lang"];

const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "target", "name"]),
    ("img", &["src", "alt", "width", "height"]),
    ("th", &["colspan", "rowspan", "align"]),
    ("td", &["colspan", "rowspan", "align"]),
    ("col", &["span"]),
    ("colgroup", &["span"]),
    ("ol", &["start"]),
];

const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "callto", "cid", "xmpp"];

const LINK_REL: &str = "noopener noreferrer";

/// Allow-list HTML sanitizer for editor content.
///
/// Anything not explicitly allowed is removed: unknown tags are unwrapped
/// (their text survives), `script`/`style` disappear with their content, and
/// event-handler attributes never pass because no `on*` attribute is listed.
pub struct HtmlSanitizer {
    cleaner: Builder<'static>,
    max_input_bytes: usize,
    preview_chars: usize,
}

impl HtmlSanitizer {
    pub fn new(config: &GuardConfig) -> Self {
        let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = TAG_ATTRIBUTES
            .iter()
            .map(|(tag, attributes)| (*tag, attributes.iter().copied().collect()))
            .collect();

        let mut cleaner = Builder::default();
        cleaner
            .tags(ALLOWED_TAGS.iter().copied().collect())
            .clean_content_tags(STRIPPED_WITH_CONTENT.iter().copied().collect())
            .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
            .tag_attributes(tag_attributes)
            .url_schemes(URL_SCHEMES.iter().copied().collect())
            .url_relative(UrlRelative::PassThrough)
            .link_rel(Some(LINK_REL));

        Self {
            cleaner,
            max_input_bytes: config.max_input_bytes,
            preview_chars: config.preview_chars,
        }
    }

    /// Reduce `content` to the allowed markup.
    ///
    /// Output is stable: sanitizing already-sanitized content returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`SanitizeError::TooLarge`] above the configured byte ceiling and
    /// [`SanitizeError::Malformed`] for content that is not markup text.
    pub fn sanitize(&self, content: &str) -> Result<String, SanitizeError> {
        let length = content.len();

        if length > self.max_input_bytes {
            debug!(length, limit = self.max_input_bytes, "Rejecting oversized markup");
            return Err(SanitizeError::TooLarge {
                length,
                limit: self.max_input_bytes,
                preview: self.preview(content),
            });
        }

        if content.contains('\0') {
            debug!(length, "Rejecting markup containing NUL characters");
            return Err(SanitizeError::Malformed {
                reason: "content contains NUL characters".to_string(),
                length,
                preview: self.preview(content),
            });
        }

        let clean = self.cleaner.clean(content).to_string();
        trace!(input_len = length, output_len = clean.len(), "Sanitized markup");
        Ok(clean)
    }

    /// First `preview_chars` characters, with `...` when cut short.
    fn preview(&self, content: &str) -> String {
        let mut chars = content.chars();
        let head: String = chars.by_ref().take(self.preview_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new(&GuardConfig::default())
    }
}

impl fmt::Debug for HtmlSanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlSanitizer")
            .field("max_input_bytes", &self.max_input_bytes)
            .field("preview_chars", &self.preview_chars)
            .finish_non_exhaustive()
    }
}
