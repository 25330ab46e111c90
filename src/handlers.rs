use std::sync::Arc;

use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Error, Request, Response};
use serde_json::Value;
use tracing::info;

use crate::auth::require_admin;
use crate::config::Config;
use crate::cors::CorsPolicy;
use crate::cursor;
use crate::error::ApiError;
use crate::models::{DeleteResponse, ListResponse, Post};
use crate::request::RequestContext;
use crate::response;
use crate::store::PostStore;

/// Page size when the client sends no usable `limit`.
const DEFAULT_PAGE_LIMIT: i64 = 10;
const MIN_PAGE_LIMIT: i64 = 1;
const MAX_PAGE_LIMIT: i64 = 50;

/// Per-process state, built once at cold start and shared by every
/// invocation.
pub struct AppState {
    config: Config,
    cors: CorsPolicy,
    store: Option<Arc<dyn PostStore>>,
}

impl AppState {
    pub fn new(config: Config, store: Option<Arc<dyn PostStore>>) -> Self {
        let cors = CorsPolicy::new(config.allowed_origins.clone());
        Self {
            config,
            cors,
            store,
        }
    }

    /// The backing store, or the misconfiguration reported when the
    /// deployment never named a table.
    fn store(&self) -> Result<&dyn PostStore, ApiError> {
        self.store
            .as_deref()
            .ok_or(ApiError::Config { missing: "TABLE_NAME" })
    }
}

/// Entry point for one gateway event: normalize, short-circuit preflight,
/// dispatch, and render the outcome with CORS headers attached.
pub async fn handle_event(state: &AppState, event: Request) -> Result<Response<Body>, Error> {
    let ctx = RequestContext::from_event(&event);
    let cors = state.cors.response_headers(&ctx.origin);

    // Preflight never reaches routing, auth, or the store.
    if ctx.method == Method::OPTIONS {
        return response::empty(StatusCode::NO_CONTENT, &cors);
    }

    let (status, body) = dispatch(state, &ctx).await;
    response::json(status, &body, &cors)
}

#[tracing::instrument(name = "request", skip_all, fields(method = %ctx.method, path = %ctx.path))]
async fn dispatch(state: &AppState, ctx: &RequestContext) -> (StatusCode, Value) {
    match route(state, ctx).await {
        Ok(rendered) => rendered,
        Err(err) => {
            err.log();
            (err.status_code(), err.body())
        }
    }
}

/// Ordered route rules: the collection routes first, the parametrized
/// single-post route next, the diagnostic 404 last.
async fn route(state: &AppState, ctx: &RequestContext) -> Result<(StatusCode, Value), ApiError> {
    if ctx.method == Method::GET && ctx.is_posts_collection() {
        return list_posts(state, ctx).await;
    }

    if ctx.method == Method::POST && ctx.is_posts_collection() {
        require_admin(&ctx.headers, &state.config)?;
        return create_post(state, ctx).await;
    }

    if ctx.method == Method::DELETE {
        if let Some(post_id) = ctx.post_id() {
            require_admin(&ctx.headers, &state.config)?;
            return delete_post(state, post_id).await;
        }
    }

    Err(ApiError::NotFound {
        method: ctx.method.to_string(),
        path: ctx.path.clone(),
    })
}

/// One page of posts, newest first.
///
/// The scan enumerates in native key order and each page is re-sorted by
/// `createdAt` afterwards, so ordering is only locally correct per page:
/// items inserted between two list calls can surface out of order across
/// the page boundary.
async fn list_posts(state: &AppState, ctx: &RequestContext) -> Result<(StatusCode, Value), ApiError> {
    let limit = effective_limit(ctx.query_param("limit"));
    let start = match ctx.query_param("nextToken") {
        Some(token) if !token.is_empty() => Some(cursor::decode_token(token)?),
        _ => None,
    };

    let page = state.store()?.scan_posts(limit, start).await?;

    let mut items = page.items;
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let next_token = page.next.as_ref().map(cursor::encode_token);
    info!(
        count = items.len(),
        has_more = next_token.is_some(),
        "Listed posts"
    );

    let body = ListResponse { items, next_token };
    Ok((StatusCode::OK, serde_json::to_value(&body)?))
}

async fn create_post(state: &AppState, ctx: &RequestContext) -> Result<(StatusCode, Value), ApiError> {
    let parsed: Value = match ctx.body.as_deref() {
        None | Some("") => Value::Object(serde_json::Map::new()),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))?,
    };

    let title = parsed.get("title").and_then(Value::as_str).unwrap_or("").trim();
    let content = parsed
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();

    if title.is_empty() || content.is_empty() {
        return Err(ApiError::BadRequest(
            "title and content are required".to_string(),
        ));
    }

    let post = Post::new(title, content);
    state.store()?.put_post(&post).await?;
    info!(post_id = %post.post_id, "Created post");

    Ok((StatusCode::CREATED, serde_json::to_value(&post)?))
}

async fn delete_post(state: &AppState, post_id: String) -> Result<(StatusCode, Value), ApiError> {
    state.store()?.delete_post(&post_id).await?;
    info!(post_id = %post_id, "Deleted post");

    let body = DeleteResponse {
        message: "Deleted".to_string(),
        post_id,
    };
    Ok((StatusCode::OK, serde_json::to_value(&body)?))
}

/// Resolves the `limit` query parameter: absent, empty, zero, or
/// non-numeric values fall back to the default; anything else is clamped
/// to the allowed range.
fn effective_limit(raw: Option<&str>) -> i32 {
    match raw.and_then(|value| value.parse::<i64>().ok()) {
        None | Some(0) => DEFAULT_PAGE_LIMIT as i32,
        Some(n) => n.clamp(MIN_PAGE_LIMIT, MAX_PAGE_LIMIT) as i32,
    }
}
