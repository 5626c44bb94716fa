//! Admin token rotation.

use axum::http::HeaderMap;
use axum::{Json, extract::State};

use super::super::audit::{AuditEvent, log_audit_event};
use super::super::auth::require_admin;
use super::super::types::{MessageResponse, RotateTokenRequest};
use super::super::{AppError, AppState};

/// POST /api/admin/token - Replace the admin access token.
///
/// Rotation takes effect the moment the config is persisted; requests
/// carrying the old token are rejected from then on.
pub(crate) async fn rotate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RotateTokenRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    require_admin(&state, &headers, "/api/admin/token").await?;

    state.config.rotate(&request.new_token).await?;
    log_audit_event(AuditEvent::TokenRotated);

    Ok(Json(MessageResponse {
        message: "Admin access token updated.",
    }))
}
