use lambda_http::http::header::{self, HeaderName};

const ALLOW_METHODS: &str = "GET,POST,DELETE,OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type,X-Admin-Token";
const MAX_AGE_SECONDS: &str = "600";

/// The header set attached to every response, preflight or not.
pub type CorsHeaders = Vec<(HeaderName, String)>;

/// Cross-origin policy derived from the configured allow-list.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    /// Value for `Access-Control-Allow-Origin`: the request origin when the
    /// allow-list is empty or contains it, otherwise the first configured
    /// origin, otherwise `*`. The header is always present, never omitted.
    pub fn allow_origin(&self, origin: &str) -> String {
        let allowed =
            self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == origin);
        if allowed {
            origin.to_string()
        } else {
            self.allowed_origins
                .first()
                .cloned()
                .unwrap_or_else(|| "*".to_string())
        }
    }

    pub fn response_headers(&self, origin: &str) -> CorsHeaders {
        vec![
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin(origin)),
            (header::VARY, "Origin".to_string()),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                ALLOW_METHODS.to_string(),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                ALLOW_HEADERS.to_string(),
            ),
            (header::ACCESS_CONTROL_MAX_AGE, MAX_AGE_SECONDS.to_string()),
        ]
    }
}
