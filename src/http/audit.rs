//! Security audit logging for admin-facing events.
//!
//! Admin authentication outcomes and token rotations are logged with a
//! dedicated target so they can be filtered for monitoring and alerting.

use tracing::{info, warn};

/// Security-relevant events worth a structured audit record.
#[derive(Debug, Clone)]
pub(crate) enum AuditEvent {
    /// Failed admin authentication attempt.
    AuthFailure { route: &'static str, reason: String },
    /// Successful admin authentication (for correlation).
    AuthSuccess { route: &'static str },
    /// The admin token was rotated.
    TokenRotated,
}

/// Log a security audit event with structured fields.
pub(crate) fn log_audit_event(event: AuditEvent) {
    match event {
        AuditEvent::AuthFailure { route, reason } => {
            warn!(
                target: "audit",
                event_type = "auth_failure",
                route,
                %reason,
                "Admin authentication failed"
            );
        }
        AuditEvent::AuthSuccess { route } => {
            info!(
                target: "audit",
                event_type = "auth_success",
                route,
                "Admin authentication succeeded"
            );
        }
        AuditEvent::TokenRotated => {
            info!(
                target: "audit",
                event_type = "token_rotated",
                "Admin access token rotated"
            );
        }
    }
}
