//! Booking submission and admin booking management.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::{Booking, BookingDraft, IdClock};
use crate::store::{Collection, StorageLayout};

/// Create/list/delete/clear over the bookings collection.
#[derive(Clone)]
pub struct BookingService {
    collection: Arc<Collection<Booking>>,
    clock: Arc<dyn IdClock>,
}

impl BookingService {
    pub fn new(layout: &StorageLayout, clock: Arc<dyn IdClock>) -> Self {
        Self {
            collection: Arc::new(Collection::new(layout.bookings_file())),
            clock,
        }
    }

    /// All bookings, in submission order.
    pub async fn list(&self) -> Result<Vec<Booking>> {
        self.collection.read_all().await
    }

    /// Append a new booking. The caller is responsible for rejecting
    /// missing name/email/phone before getting here; selected design ids
    /// are kept verbatim with no referential check.
    pub async fn create(&self, draft: BookingDraft) -> Result<Booking> {
        let booking = Booking {
            id: self.clock.new_id(),
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            event_date: draft.event_date.filter(|d| !d.trim().is_empty()),
            preferred_style: draft.preferred_style.filter(|s| !s.trim().is_empty()),
            selected_design_ids: draft.selected_design_ids,
            message: draft.message.unwrap_or_default(),
            submitted_at: self.clock.now(),
        };

        let record = booking.clone();
        self.collection
            .update(move |all| {
                all.push(record);
                Ok(())
            })
            .await?;

        Ok(booking)
    }

    /// Remove one booking.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for an unknown id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let wanted = id.to_string();
        self.collection
            .update(move |all| {
                let idx = all
                    .iter()
                    .position(|b| b.id == wanted)
                    .ok_or_else(|| Error::not_found("booking", wanted.clone()))?;
                all.remove(idx);
                Ok(())
            })
            .await
    }

    /// Drop every booking.
    pub async fn clear(&self) -> Result<()> {
        self.collection.write_all(&[]).await
    }
}
