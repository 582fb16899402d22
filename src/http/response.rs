//! Error responses.
//!
//! Maps quoting errors to HTTP status codes:
//! - address not found → 404
//! - no zone → 422 with the suggestion list
//! - price conflict → 409 with both prices
//! - lookup backend failure → 503
//! - malformed input → 400, missing owner → 401

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::quoting::QuoteError;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body or fields failed validation.
    #[error("{0}")]
    BadRequest(String),

    /// No owner identity was supplied.
    #[error("owner identity is required")]
    MissingOwner,

    #[error(transparent)]
    Quote(#[from] QuoteError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_price: Option<i64>,
}

impl ErrorBody {
    fn new(error: &'static str, message: String) -> Self {
        Self {
            error,
            message,
            client_price: None,
            server_price: None,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingOwner => StatusCode::UNAUTHORIZED,
            ApiError::Quote(QuoteError::AddressNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Quote(QuoteError::NoZone(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Quote(QuoteError::PriceConflict { .. }) => StatusCode::CONFLICT,
            ApiError::Quote(QuoteError::Lookup(_)) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match self {
            ApiError::BadRequest(_) => {
                (status, Json(ErrorBody::new("invalid_request", message))).into_response()
            }
            ApiError::MissingOwner => {
                (status, Json(ErrorBody::new("unauthorized", message))).into_response()
            }
            ApiError::Quote(QuoteError::AddressNotFound { .. }) => {
                (status, Json(ErrorBody::new("address_not_found", message))).into_response()
            }
            ApiError::Quote(QuoteError::NoZone(no_match)) => {
                (status, Json(no_match)).into_response()
            }
            ApiError::Quote(QuoteError::PriceConflict {
                client_price,
                server_price,
            }) => {
                let body = ErrorBody {
                    client_price: Some(client_price),
                    server_price: Some(server_price),
                    ..ErrorBody::new("price_conflict", message)
                };
                (status, Json(body)).into_response()
            }
            ApiError::Quote(QuoteError::Lookup(e)) => {
                tracing::error!(error = %e, "Address lookup failed");
                (
                    status,
                    Json(ErrorBody::new(
                        "lookup_unavailable",
                        "address lookup is temporarily unavailable".to_string(),
                    )),
                )
                    .into_response()
            }
        }
    }
}
