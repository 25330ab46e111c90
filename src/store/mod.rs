pub mod dynamo;
pub mod errors;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::Post;

pub use dynamo::DynamoPostStore;
pub use errors::StoreError;

/// Primary key of the last item a bounded scan evaluated. Feeding it back
/// resumes the scan strictly after that item.
///
/// Deserialization accepts exactly this shape; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResumeKey {
    #[serde(rename = "postID")]
    pub post_id: String,
}

/// One page of a bounded scan.
#[derive(Debug, Clone)]
pub struct ScanPage {
    pub items: Vec<Post>,
    /// Where the next scan should resume, absent once the table is exhausted.
    pub next: Option<ResumeKey>,
}

/// Post persistence operations the request handlers depend on.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Reads at most `limit` items in the table's native key order, starting
    /// after `start` when given.
    async fn scan_posts(&self, limit: i32, start: Option<ResumeKey>) -> Result<ScanPage, StoreError>;

    /// Writes a post, replacing any item with the same `postID`.
    async fn put_post(&self, post: &Post) -> Result<(), StoreError>;

    /// Removes a post. Succeeds whether or not the item existed.
    async fn delete_post(&self, post_id: &str) -> Result<(), StoreError>;
}
