//! Portfolio design operations.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::janitor::Janitor;
use crate::media::{self, MediaStore, MediaUpload};
use crate::model::{Design, DesignDraft, IdClock};
use crate::store::{Collection, StorageLayout};

/// Create/list/delete over the designs collection plus the media files
/// the records point at.
#[derive(Clone)]
pub struct DesignService {
    collection: Arc<Collection<Design>>,
    media: MediaStore,
    janitor: Janitor,
    clock: Arc<dyn IdClock>,
}

impl DesignService {
    pub fn new(layout: &StorageLayout, janitor: Janitor, clock: Arc<dyn IdClock>) -> Self {
        Self {
            collection: Arc::new(Collection::new(layout.designs_file())),
            media: MediaStore::new(layout),
            janitor,
            clock,
        }
    }

    /// All designs, in insertion order.
    pub async fn list(&self) -> Result<Vec<Design>> {
        self.collection.read_all().await
    }

    /// Store the uploaded media, then append the new record.
    ///
    /// The recorded MIME type prefers what the upload itself reports over
    /// the caller-supplied hint. The caller is responsible for rejecting
    /// an empty title before getting here.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedMedia`] for types outside the accepted set,
    /// [`Error::StorageUnavailable`] on any write failure.
    pub async fn create(&self, draft: DesignDraft, upload: MediaUpload) -> Result<Design> {
        let media_type = media::resolve_media_type(
            upload.content_type.as_deref(),
            draft.media_type.as_deref(),
            &upload.original_file_name,
        );
        media::check_media_type(&media_type)?;

        let created_at = self.clock.now();
        let stored = self
            .media
            .save(&upload, &media_type, created_at.timestamp_millis())
            .await?;

        let design = Design {
            id: self.clock.new_id(),
            title: draft.title.trim().to_string(),
            description: draft.description.unwrap_or_default(),
            category: draft
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "general".to_string()),
            media_type: stored.media_type,
            media_url: stored.media_url,
            original_file_name: stored.original_file_name,
            created_at,
        };

        let record = design.clone();
        self.collection
            .update(move |all| {
                all.push(record);
                Ok(())
            })
            .await?;

        Ok(design)
    }

    /// Remove a design and schedule best-effort removal of its media.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for an unknown id; the collection file is left
    /// untouched in that case.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let wanted = id.to_string();
        let removed = self
            .collection
            .update(move |all| {
                let idx = all
                    .iter()
                    .position(|d| d.id == wanted)
                    .ok_or_else(|| Error::not_found("design", wanted.clone()))?;
                Ok(all.remove(idx))
            })
            .await?;

        if let Some(path) = self.media.path_for_url(&removed.media_url) {
            self.janitor.schedule_remove(path);
        }
        Ok(())
    }
}
