use std::borrow::Cow;

use lambda_http::aws_lambda_events::query_map::QueryMap;
use lambda_http::http::{HeaderMap, Method};
use lambda_http::{Body, Request, RequestExt};

/// Canonical view of one gateway event, extracted once per invocation.
#[derive(Debug)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    /// The `Origin` header, empty when the request carried none.
    pub origin: String,
    pub headers: HeaderMap,
    pub query: QueryMap,
    pub body: Option<String>,
}

impl RequestContext {
    pub fn from_event(event: &Request) -> Self {
        let headers = event.headers().clone();
        let origin = headers
            .get("origin")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        // Gateway events carry the unrouted path separately; fall back to
        // the URI path for events (and tests) that do not.
        let mut path = event.raw_http_path().to_string();
        if path.is_empty() {
            path = event.uri().path().to_string();
        }
        if path.is_empty() {
            path = "/".to_string();
        }

        let body = match event.body() {
            Body::Empty => None,
            Body::Text(text) => Some(text.clone()),
            Body::Binary(bytes) => String::from_utf8(bytes.clone()).ok(),
        };

        Self {
            method: event.method().clone(),
            path,
            origin,
            headers,
            query: event.query_string_parameters(),
            body,
        }
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.first(name)
    }

    /// True for the posts collection, with or without a gateway stage
    /// prefix (`/posts`, `/dev/posts`).
    pub fn is_posts_collection(&self) -> bool {
        self.path == "/posts" || self.path.ends_with("/posts")
    }

    /// The percent-decoded `{id}` of a `/posts/{id}` path, stage prefix
    /// tolerated. `None` when the path has a different shape.
    pub fn post_id(&self) -> Option<String> {
        post_id_from_path(&self.path)
    }
}

fn post_id_from_path(path: &str) -> Option<String> {
    let (prefix, segment) = path.rsplit_once('/')?;
    if segment.is_empty() || !prefix.ends_with("/posts") {
        return None;
    }
    // An undecodable segment is kept verbatim rather than failing the route.
    let decoded = urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string());
    Some(decoded)
}
