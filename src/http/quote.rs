//! Estimate and confirm endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::http::request::{request_id, resolve_owner};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::matching::MatchOutcome;
use crate::quoting::ConfirmedPrice;

/// Body of `POST /api/v1/delivery/estimate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    #[serde(default)]
    pub address_id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
}

/// Body of `POST /api/v1/delivery/confirm`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    #[serde(default)]
    pub address_id: String,
    #[serde(default)]
    pub client_price: Option<i64>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

fn required_address_id(address_id: &str) -> Result<&str, ApiError> {
    let address_id = address_id.trim();
    if address_id.is_empty() {
        return Err(ApiError::BadRequest("addressId is required".to_string()));
    }
    Ok(address_id)
}

fn required_price(client_price: Option<i64>) -> Result<i64, ApiError> {
    match client_price {
        Some(price) if price > 0 => Ok(price),
        Some(_) => Err(ApiError::BadRequest(
            "clientPrice must be a positive integer".to_string(),
        )),
        None => Err(ApiError::BadRequest("clientPrice is required".to_string())),
    }
}

/// `POST /api/v1/delivery/estimate`
///
/// 200 with the match, 422 with suggestions when no zone matches.
pub async fn estimate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let address_id = required_address_id(&request.address_id)?;
    let owner_id = resolve_owner(request.owner_id.as_deref(), &headers)?;

    tracing::debug!(
        request_id = %request_id(&headers),
        address_id,
        "Estimating delivery price"
    );

    let response = match state.engine.estimate(&owner_id, address_id).await? {
        MatchOutcome::Matched(result) => (StatusCode::OK, Json(result)).into_response(),
        MatchOutcome::NoMatch(no_match) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(no_match)).into_response()
        }
    };
    Ok(response)
}

/// `POST /api/v1/delivery/confirm`
///
/// Recomputes the quote and only confirms an identical client price.
pub async fn confirm(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<ConfirmedPrice>, ApiError> {
    let Json(request) = payload?;
    let address_id = required_address_id(&request.address_id)?;
    let client_price = required_price(request.client_price)?;
    let owner_id = resolve_owner(request.owner_id.as_deref(), &headers)?;

    tracing::debug!(
        request_id = %request_id(&headers),
        address_id,
        client_price,
        "Confirming delivery price"
    );

    let confirmed = state
        .engine
        .confirm_order(&owner_id, address_id, client_price)
        .await?;
    Ok(Json(confirmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_validation() {
        assert_eq!(required_address_id("  a1 ").unwrap(), "a1");
        assert!(required_address_id("   ").is_err());

        assert_eq!(required_price(Some(1500)).unwrap(), 1500);
        assert!(required_price(Some(0)).is_err());
        assert!(required_price(Some(-3)).is_err());
        assert!(required_price(None).is_err());
    }

    #[test]
    fn test_request_bodies() {
        let request: ConfirmRequest =
            serde_json::from_str(r#"{"addressId": "a1", "clientPrice": 1500}"#).unwrap();
        assert_eq!(request.address_id, "a1");
        assert_eq!(request.client_price, Some(1500));
        assert!(request.owner_id.is_none());

        let request: EstimateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.address_id.is_empty());
    }
}
