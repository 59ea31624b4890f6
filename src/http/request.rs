//! Request parsing helpers and request IDs.
//!
//! # Responsibilities
//! - Generate a UUID v4 `x-request-id` for every request
//! - Turn prefix-stripped path parameters into typed keys
//! - Decode and validate JSON bodies
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Every parse failure becomes a 400 envelope before any use-case call

use axum::http::{HeaderValue, Request};
use serde::de::DeserializeOwned;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::envelope::ApiError;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Produces a fresh UUID v4 for each request without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Read the request ID header, if present.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Parse an entry ID taken from the path.
pub fn parse_entry_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|e| ApiError::bad_request("invalid entry ID", e.to_string()))
}

/// Reject an empty path parameter before it reaches a use-case.
pub fn require_param<'a>(raw: &'a str, name: &'static str) -> Result<&'a str, ApiError> {
    if raw.is_empty() {
        return Err(ApiError::bad_request(format!("{} is required", name), format!("missing {}", name)));
    }
    Ok(raw)
}

/// Decode a JSON body into `T`.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request("invalid request body", e.to_string()))
}

/// Turn a list of field problems into a 400.
pub fn validation_error(problems: Vec<String>) -> ApiError {
    ApiError::bad_request("invalid request body", problems.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryInput;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_entry_id() {
        assert_eq!(parse_entry_id("42").unwrap(), 42);

        let err = parse_entry_id("abc").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "invalid entry ID");

        assert!(parse_entry_id("").is_err());
        assert!(parse_entry_id("1/2").is_err());
    }

    #[test]
    fn test_require_param() {
        assert_eq!(require_param("hello", "slug").unwrap(), "hello");
        let err = require_param("", "slug").unwrap_err();
        assert_eq!(err.message(), "slug is required");
    }

    #[test]
    fn test_decode_json_reports_decoder_message() {
        let err = decode_json::<EntryInput>(b"{not json").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "invalid request body");
        assert!(err.error().contains("key must be a string"));
    }

    #[test]
    fn test_request_ids_are_uuids() {
        let request = Request::new(());
        let id = UuidRequestId.make_request_id(&request).unwrap();
        let text = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(text).is_ok());
    }
}
