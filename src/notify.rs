//! Booking notification hook.
//!
//! Outbound delivery (SMTP) is an external collaborator; this module
//! resolves the recipient and emits a structured record of each booking
//! for the operator's log pipeline to pick up.

use tracing::info;

use crate::constants::DEFAULT_ADMIN_EMAIL;
use crate::model::Booking;
use crate::store::ConfigStore;

/// Resolve the admin notification recipient: explicit override first,
/// then the configured `adminEmail`, then the fixed default.
pub async fn admin_recipient(config: &ConfigStore, override_email: Option<&str>) -> String {
    if let Some(email) = override_email
        && !email.trim().is_empty()
    {
        return email.trim().to_string();
    }
    match config.admin_email().await {
        Ok(email) if !email.trim().is_empty() => email.trim().to_string(),
        _ => DEFAULT_ADMIN_EMAIL.to_string(),
    }
}

/// Surface a new booking to the operator.
pub async fn booking_submitted(
    config: &ConfigStore,
    override_email: Option<&str>,
    booking: &Booking,
) {
    let recipient = admin_recipient(config, override_email).await;
    info!(
        target: "notify",
        %recipient,
        booking_id = %booking.id,
        name = %booking.name,
        phone = %booking.phone,
        event_date = booking.event_date.as_deref().unwrap_or("not provided"),
        preferred_style = booking.preferred_style.as_deref().unwrap_or("not provided"),
        selected_designs = booking.selected_design_ids.len(),
        "booking submitted"
    );
}
