//! Request identification and caller identity.
//!
//! # Responsibilities
//! - Generate a UUID v4 `x-request-id` for requests that lack one
//! - Resolve the owner identity from the `x-owner-id` header or request body

use axum::http::{HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::ApiError;

/// Request ID header, set on requests and echoed on responses.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Owner identity header, set by the authenticating gateway.
pub const X_OWNER_ID: &str = "x-owner-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The request ID for logging, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Resolve the caller's owner identity.
///
/// The header wins; a body `ownerId` is accepted when no header is sent but
/// must agree with the header when both are present.
pub fn resolve_owner(body_owner: Option<&str>, headers: &HeaderMap) -> Result<String, ApiError> {
    let header_owner = headers
        .get(X_OWNER_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let body_owner = body_owner.map(str::trim).filter(|s| !s.is_empty());

    match (header_owner, body_owner) {
        (Some(header), Some(body)) if header != body => Err(ApiError::BadRequest(
            "ownerId does not match the authenticated owner".to_string(),
        )),
        (Some(owner), _) | (None, Some(owner)) => Ok(owner.to_string()),
        (None, None) => Err(ApiError::MissingOwner),
    }
}
