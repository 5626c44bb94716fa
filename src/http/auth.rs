//! Admin authorization gate.

use axum::http::HeaderMap;
use tracing::error;

use super::audit::{AuditEvent, log_audit_event};
use super::{AppError, AppState, metrics};

/// Request header carrying the shared admin token.
pub(crate) const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Verify the admin token on a request, or fail with the response the
/// client should see. Called at the top of every admin handler.
pub(crate) async fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
    route: &'static str,
) -> Result<(), AppError> {
    let presented = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    match state.config.verify(presented).await {
        Ok(true) => {
            log_audit_event(AuditEvent::AuthSuccess { route });
            Ok(())
        }
        Ok(false) => {
            metrics::record_auth_failure();
            let reason = if presented.trim().is_empty() {
                "missing admin token"
            } else {
                "token mismatch"
            };
            log_audit_event(AuditEvent::AuthFailure {
                route,
                reason: reason.to_string(),
            });
            Err(AppError::Unauthorized("Unauthorized admin access.".to_string()))
        }
        Err(err) => {
            error!(%err, "admin token unavailable");
            Err(AppError::Internal(
                "Admin token is not configured on the server.".to_string(),
            ))
        }
    }
}
