//! Status, health, and static catalogue handlers.

use axum::Json;
use chrono::Utc;

use super::super::types::{ApiStatus, HealthResponse};
use crate::model::{MEHANDI_STYLES, MehandiStyle};

/// GET / - API status banner.
pub(crate) async fn root() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        message: "Mehandi API running",
    })
}

/// GET /health - health probe.
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready",
        timestamp: Utc::now(),
    })
}

/// GET /api/types - the fixed mehandi style catalogue.
pub(crate) async fn list_types() -> Json<Vec<MehandiStyle>> {
    Json(MEHANDI_STYLES.to_vec())
}
