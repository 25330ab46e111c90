use lambda_http::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::cursor::InvalidToken;
use crate::store::StoreError;

/// Request-level failures, one variant per response shape.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A deployment setting required by this route is absent. An operator
    /// error, reported distinctly from client errors.
    #[error("{missing} is missing in Lambda env vars")]
    Config { missing: &'static str },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("no route for {method} {path}")]
    NotFound { method: String, path: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Faults in response assembly itself. Never carries client input.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing JSON body. Store and internal failures collapse to a
    /// generic message; their detail stays in the server-side log.
    pub fn body(&self) -> Value {
        match self {
            ApiError::Config { missing } => json!({
                "message": "Server misconfigured",
                "error": format!("{missing} is missing in Lambda env vars"),
            }),
            ApiError::Unauthorized => json!({ "message": "Unauthorized" }),
            ApiError::BadRequest(message) => json!({ "message": message }),
            ApiError::NotFound { method, path } => json!({
                "message": "Not found",
                "method": method,
                "path": path,
            }),
            ApiError::Store(_) | ApiError::Internal(_) => {
                json!({ "message": "Internal server error" })
            }
        }
    }

    pub fn log(&self) {
        match self {
            ApiError::Config { missing } => error!(missing = %missing, "server misconfigured"),
            ApiError::Store(source) => error!(error = %source, "store request failed"),
            ApiError::Internal(detail) => error!(detail = %detail, "internal error"),
            ApiError::Unauthorized => warn!("rejected admin credential"),
            ApiError::BadRequest(message) => warn!(reason = %message, "rejected request"),
            ApiError::NotFound { method, path } => info!(%method, %path, "no route matched"),
        }
    }
}

impl From<InvalidToken> for ApiError {
    fn from(_: InvalidToken) -> Self {
        ApiError::BadRequest("Invalid nextToken".to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
