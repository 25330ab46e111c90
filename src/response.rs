use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::http::StatusCode;
use lambda_http::{Body, Error, Response};
use serde_json::Value;

use crate::cors::CorsHeaders;

/// A JSON response with the CORS set attached.
pub fn json(status: StatusCode, body: &Value, cors: &CorsHeaders) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json");
    for (name, value) in cors {
        builder = builder.header(name, value.as_str());
    }
    Ok(builder.body(Body::from(body.to_string()))?)
}

/// A header-only response, used for preflight.
pub fn empty(status: StatusCode, cors: &CorsHeaders) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder().status(status);
    for (name, value) in cors {
        builder = builder.header(name, value.as_str());
    }
    Ok(builder.body(Body::Empty)?)
}
