use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::instrument;

use super::{PostStore, ResumeKey, ScanPage, StoreError};
use crate::models::Post;

/// Post storage backed by a DynamoDB table keyed by `postID`.
#[derive(Debug, Clone)]
pub struct DynamoPostStore {
    client: Client,
    table: String,
}

impl DynamoPostStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Builds a client from the ambient AWS environment (region, credentials,
    /// endpoint overrides).
    pub async fn from_env(table: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table)
    }
}

#[async_trait]
impl PostStore for DynamoPostStore {
    #[instrument(skip(self))]
    async fn scan_posts(&self, limit: i32, start: Option<ResumeKey>) -> Result<ScanPage, StoreError> {
        let mut request = self.client.scan().table_name(&self.table).limit(limit);
        if let Some(key) = start {
            request = request.exclusive_start_key("postID", AttributeValue::S(key.post_id));
        }
        let output = request
            .send()
            .await
            .map_err(|e| StoreError::Scan(e.to_string()))?;

        let items = output.items().iter().map(post_from_item).collect();
        let next = output.last_evaluated_key().and_then(resume_key_from_attrs);
        Ok(ScanPage { items, next })
    }

    #[instrument(skip(self, post), fields(post_id = %post.post_id))]
    async fn put_post(&self, post: &Post) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item_from_post(post)))
            .send()
            .await
            .map_err(|e| StoreError::Put(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, post_id: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key("postID", AttributeValue::S(post_id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Delete(e.to_string()))?;
        Ok(())
    }
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> String {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .unwrap_or_default()
}

/// Maps a table item to a post. Items written by hand with attributes
/// missing or of the wrong type come back with those fields empty rather
/// than failing the whole page.
fn post_from_item(item: &HashMap<String, AttributeValue>) -> Post {
    Post {
        post_id: string_attr(item, "postID"),
        title: string_attr(item, "title"),
        content: string_attr(item, "content"),
        created_at: string_attr(item, "createdAt"),
    }
}

fn item_from_post(post: &Post) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("postID".to_string(), AttributeValue::S(post.post_id.clone())),
        ("title".to_string(), AttributeValue::S(post.title.clone())),
        ("content".to_string(), AttributeValue::S(post.content.clone())),
        (
            "createdAt".to_string(),
            AttributeValue::S(post.created_at.clone()),
        ),
    ])
}

fn resume_key_from_attrs(key: &HashMap<String, AttributeValue>) -> Option<ResumeKey> {
    key.get("postID")
        .and_then(|value| value.as_s().ok())
        .map(|id| ResumeKey {
            post_id: id.clone(),
        })
}
