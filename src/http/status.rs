//! Health and catalog listing endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::http::server::AppState;
use crate::zones::ZoneRecord;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub zones: usize,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        zones: state.engine.matcher().catalog().len(),
    })
}

/// `GET /api/v1/zones`
///
/// Zones of the active catalog, in catalog order.
pub async fn list_zones(State(state): State<AppState>) -> Json<Vec<ZoneRecord>> {
    Json(state.engine.matcher().catalog().records())
}
