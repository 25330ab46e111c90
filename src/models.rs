use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published blog post as stored and served. `postID` is the table's
/// primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "postID")]
    pub post_id: String,
    pub title: String,
    pub content: String,
    /// ISO-8601 UTC timestamp with millisecond precision, e.g.
    /// `2026-08-22T09:15:00.000Z`. Lexicographic order on this field is
    /// chronological order.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Post {
    /// Builds a new post with a random identifier and the current time.
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            post_id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: current_timestamp(),
        }
    }
}

/// Current time in the wire format used for `createdAt`.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body of a successful `GET /posts` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<Post>,
    /// Opaque cursor for the next page, `null` when the scan is exhausted.
    #[serde(rename = "nextToken")]
    pub next_token: Option<String>,
}

/// Body of a successful `DELETE /posts/{id}` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    #[serde(rename = "postID")]
    pub post_id: String,
}
