//! Booking handlers: public submission plus admin management.

use axum::http::{HeaderMap, StatusCode};
use axum::{
    Json,
    extract::{Path, State},
};

use super::super::auth::require_admin;
use super::super::types::{BookingCreatedResponse, MessageResponse};
use super::super::{AppError, AppState, metrics};
use crate::model::{Booking, BookingDraft};
use crate::notify;

/// POST /api/bookings - Submit a booking from the public site.
pub(crate) async fn create_booking(
    State(state): State<AppState>,
    Json(draft): Json<BookingDraft>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), AppError> {
    metrics::record_booking_operation("create");

    if draft.name.trim().is_empty()
        || draft.email.trim().is_empty()
        || draft.phone.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Name, email, and phone are required.".to_string(),
        ));
    }

    let booking = state.bookings.create(draft).await?;
    notify::booking_submitted(
        &state.config,
        state.admin_email_override.as_deref(),
        &booking,
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedResponse {
            message: "Booking submitted.",
            booking,
        }),
    ))
}

/// GET /api/admin/bookings - List all bookings.
pub(crate) async fn list_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    require_admin(&state, &headers, "/api/admin/bookings").await?;
    metrics::record_booking_operation("list");
    Ok(Json(state.bookings.list().await?))
}

/// DELETE /api/admin/bookings/{id} - Delete one booking.
pub(crate) async fn delete_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    require_admin(&state, &headers, "/api/admin/bookings/{id}").await?;
    metrics::record_booking_operation("delete");

    state.bookings.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Booking removed.",
    }))
}

/// DELETE /api/admin/bookings - Clear all bookings.
pub(crate) async fn clear_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    require_admin(&state, &headers, "/api/admin/bookings").await?;
    metrics::record_booking_operation("clear");

    state.bookings.clear().await?;
    Ok(Json(MessageResponse {
        message: "All bookings cleared.",
    }))
}
