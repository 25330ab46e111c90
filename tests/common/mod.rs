use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lambda_http::aws_lambda_events::query_map::QueryMap;
use lambda_http::{Body, Request, RequestExt, Response};
use serde_json::Value;

use posts_api::store::{PostStore, ResumeKey, ScanPage, StoreError};
use posts_api::{handle_event, AppState, Config, Post};

pub const ADMIN_TOKEN: &str = "test-admin-token";

/// In-memory `PostStore` with the same observable contract as the real
/// table: key-ordered bounded scans handing back a resume key, upserts,
/// idempotent deletes. Call counters and a failure switch support
/// interaction assertions.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, Post>>,
    fail: AtomicBool,
    scan_calls: AtomicUsize,
    put_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    scan_limits: Mutex<Vec<i32>>,
}

impl MemoryStore {
    pub fn insert(&self, post: Post) {
        self.items
            .lock()
            .unwrap()
            .insert(post.post_id.clone(), post);
    }

    pub fn get(&self, post_id: &str) -> Option<Post> {
        self.items.lock().unwrap().get(post_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn scan_count(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    pub fn put_count(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn store_calls(&self) -> usize {
        self.scan_count() + self.put_count() + self.delete_count()
    }

    /// Every `limit` value the handler has asked a scan for.
    pub fn seen_limits(&self) -> Vec<i32> {
        self.scan_limits.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn scan_posts(
        &self,
        limit: i32,
        start: Option<ResumeKey>,
    ) -> Result<ScanPage, StoreError> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        self.scan_limits.lock().unwrap().push(limit);
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Scan("simulated outage".to_string()));
        }

        let items = self.items.lock().unwrap();
        let after = start.map(|key| key.post_id);
        let mut page = Vec::new();
        for (post_id, post) in items.iter() {
            if let Some(after) = &after {
                if post_id <= after {
                    continue;
                }
            }
            page.push(post.clone());
            if page.len() as i32 == limit {
                break;
            }
        }

        // Like the real scan, a resume key comes back whenever the page
        // filled up, even if the table happens to be exhausted.
        let next = if page.len() as i32 == limit {
            page.last().map(|post| ResumeKey {
                post_id: post.post_id.clone(),
            })
        } else {
            None
        };

        Ok(ScanPage { items: page, next })
    }

    async fn put_post(&self, post: &Post) -> Result<(), StoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Put("simulated outage".to_string()));
        }
        self.insert(post.clone());
        Ok(())
    }

    async fn delete_post(&self, post_id: &str) -> Result<(), StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Delete("simulated outage".to_string()));
        }
        self.items.lock().unwrap().remove(post_id);
        Ok(())
    }
}

/// One API under test: an `AppState` wired to a fresh in-memory store.
pub struct TestApi {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestApi {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::new(config, Some(store.clone() as Arc<dyn PostStore>));
        Self { store, state }
    }

    /// A deployment that never named a table: no store behind the handler.
    pub fn without_table() -> Self {
        let config = Config {
            table_name: None,
            ..test_config()
        };
        Self {
            store: Arc::new(MemoryStore::default()),
            state: AppState::new(config, None),
        }
    }

    pub fn seed(&self, posts: Vec<Post>) {
        for post in posts {
            self.store.insert(post);
        }
    }

    pub async fn send(&self, request: Request) -> Response<Body> {
        handle_event(&self.state, request)
            .await
            .expect("handler should always render a response")
    }
}

pub fn test_config() -> Config {
    Config {
        table_name: Some("posts-test".to_string()),
        admin_token: Some(ADMIN_TOKEN.to_string()),
        allowed_origins: Vec::new(),
    }
}

/// Posts with ascending ids and `createdAt` a minute apart, so both scan
/// order and display order are deterministic.
pub fn seeded_posts(count: usize) -> Vec<Post> {
    (0..count)
        .map(|n| Post {
            post_id: format!("post-{n:02}"),
            title: format!("Title {n}"),
            content: format!("Content {n}"),
            created_at: format!("2026-08-22T09:{n:02}:00.000Z"),
        })
        .collect()
}

pub fn request(method: &str, path: &str) -> Request {
    lambda_http::http::Request::builder()
        .method(method)
        .uri(path)
        .body(Body::Empty)
        .unwrap()
}

pub fn with_header(mut request: Request, name: &'static str, value: &str) -> Request {
    request.headers_mut().insert(name, value.parse().unwrap());
    request
}

pub fn with_body(request: Request, body: &str) -> Request {
    let (parts, _) = request.into_parts();
    Request::from_parts(parts, Body::from(body))
}

pub fn with_query(request: Request, params: &[(&str, &str)]) -> Request {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in params {
        map.entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }
    request.with_query_string_parameters(QueryMap::from(map))
}

/// POST /posts with the admin header and a JSON body.
pub fn admin_post(body: &str) -> Request {
    let request = with_body(request("POST", "/posts"), body);
    let request = with_header(request, "content-type", "application/json");
    with_header(request, "x-admin-token", ADMIN_TOKEN)
}

pub fn admin_delete(path: &str) -> Request {
    with_header(request("DELETE", path), "x-admin-token", ADMIN_TOKEN)
}

pub fn body_json(response: &Response<Body>) -> Value {
    match response.body() {
        Body::Text(text) => serde_json::from_str(text).expect("response body should be JSON"),
        Body::Binary(bytes) => serde_json::from_slice(bytes).expect("response body should be JSON"),
        Body::Empty => panic!("expected a JSON body, response had none"),
    }
}

pub fn header_value<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
}
