//! Request and response bodies for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Booking;

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiStatus {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    pub message: &'static str,
}

/// Booking creation echoes the stored record alongside the confirmation.
#[derive(Debug, Serialize)]
pub(crate) struct BookingCreatedResponse {
    pub message: &'static str,
    pub booking: Booking,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RotateTokenRequest {
    #[serde(default)]
    pub new_token: String,
}
