use constant_time_eq::constant_time_eq;
use lambda_http::http::HeaderMap;

use crate::config::Config;
use crate::error::ApiError;

/// Credential header gating mutating routes.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admission check for mutating routes.
///
/// A deployment without a secret fails closed as a configuration error,
/// not as an auth failure. Otherwise the client token must match the
/// secret; a missing header counts as an empty token.
pub fn require_admin(headers: &HeaderMap, config: &Config) -> Result<(), ApiError> {
    let expected = config
        .admin_token
        .as_deref()
        .ok_or(ApiError::Config { missing: "ADMIN_TOKEN" })?;

    let provided = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        return Err(ApiError::Unauthorized);
    }
    Ok(())
}
