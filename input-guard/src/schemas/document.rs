use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

/// Markup flavour of a document body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Html,
    Markdown,
    Json,
}

/// A document as saved by the editor.
///
/// `content` is sanitized by the pipeline; the remaining fields pass through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,

    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 1000000, message = "content exceeds 1000000 characters"))]
    pub content: String,

    pub content_type: ContentType,

    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[validate(length(min = 1, message = "authorId must not be empty"))]
    pub author_id: String,
}
