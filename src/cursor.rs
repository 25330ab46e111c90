use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

use crate::store::ResumeKey;

/// A client-supplied pagination token that failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid pagination token")]
pub struct InvalidToken;

/// Wire form of a resume key: standard base64 over its JSON encoding.
pub fn encode_token(key: &ResumeKey) -> String {
    let json = serde_json::json!({ "postID": key.post_id }).to_string();
    general_purpose::STANDARD.encode(json)
}

/// Decodes an untrusted token back into a resume key. Anything that is not
/// base64 of exactly `{"postID": "<string>"}` is rejected before the store
/// sees it.
pub fn decode_token(token: &str) -> Result<ResumeKey, InvalidToken> {
    let bytes = general_purpose::STANDARD
        .decode(token)
        .map_err(|_| InvalidToken)?;
    let text = String::from_utf8(bytes).map_err(|_| InvalidToken)?;
    serde_json::from_str(&text).map_err(|_| InvalidToken)
}
