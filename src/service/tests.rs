//! Tests for the design and booking services.

use super::*;
use crate::constants::DEFAULT_ADMIN_EMAIL;
use crate::error::Error;
use crate::janitor::Janitor;
use crate::media::MediaUpload;
use crate::model::{BookingDraft, DesignDraft, IdClock, SystemIdClock};
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tempfile::TempDir;

use crate::store::{StorageLayout, bootstrap};

/// Sequential ids and a pinned clock for deterministic records.
struct FixedIdClock {
    counter: AtomicU64,
    now: DateTime<Utc>,
}

impl FixedIdClock {
    fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
            now: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        }
    }
}

impl IdClock for FixedIdClock {
    fn new_id(&self) -> String {
        format!("id-{}", self.counter.fetch_add(1, Ordering::SeqCst))
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

async fn booted_layout(tmp: &TempDir) -> StorageLayout {
    let layout = StorageLayout::Local {
        base: tmp.path().to_path_buf(),
    };
    bootstrap(&layout, Some("test-token"), DEFAULT_ADMIN_EMAIL)
        .await
        .unwrap();
    layout
}

fn jpeg_upload(name: &str) -> MediaUpload {
    MediaUpload {
        original_file_name: name.to_string(),
        content_type: Some("image/jpeg".to_string()),
        data: Bytes::from_static(b"jpeg bytes"),
    }
}

fn draft(title: &str, category: &str) -> DesignDraft {
    DesignDraft {
        title: title.to_string(),
        category: Some(category.to_string()),
        ..DesignDraft::default()
    }
}

fn booking_draft(name: &str) -> BookingDraft {
    BookingDraft {
        name: name.to_string(),
        email: format!("{name}@example.com"),
        phone: "+91 98000 00000".to_string(),
        ..BookingDraft::default()
    }
}

// =============================================================================
// Designs
// =============================================================================

#[tokio::test]
async fn test_create_then_list_returns_equal_record() {
    let tmp = TempDir::new().unwrap();
    let layout = booted_layout(&tmp).await;
    let service = DesignService::new(&layout, Janitor::spawn(), Arc::new(FixedIdClock::new()));

    let created = service
        .create(draft("Bridal Bloom", "bridal"), jpeg_upload("bloom.jpg"))
        .await
        .unwrap();

    assert_eq!(created.id, "id-0");
    assert_eq!(created.media_type, "image/jpeg");
    assert!(created.media_url.starts_with("/uploads/"));
    assert_eq!(service.list().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn test_create_stores_media_file() {
    let tmp = TempDir::new().unwrap();
    let layout = booted_layout(&tmp).await;
    let service = DesignService::new(&layout, Janitor::spawn(), Arc::new(FixedIdClock::new()));

    let created = service
        .create(draft("Bridal Bloom", "bridal"), jpeg_upload("my bloom.jpg"))
        .await
        .unwrap();

    let file_name = created.media_url.strip_prefix("/uploads/").unwrap();
    assert!(file_name.ends_with("-my_bloom.jpg"));
    let stored = layout.uploads_dir().join(file_name);
    assert_eq!(std::fs::read(stored).unwrap(), b"jpeg bytes");
}

#[tokio::test]
async fn test_create_rejects_unsupported_media() {
    let tmp = TempDir::new().unwrap();
    let layout = booted_layout(&tmp).await;
    let service = DesignService::new(&layout, Janitor::spawn(), Arc::new(FixedIdClock::new()));

    let upload = MediaUpload {
        original_file_name: "notes.pdf".to_string(),
        content_type: Some("application/pdf".to_string()),
        data: Bytes::from_static(b"%PDF"),
    };
    let err = service.create(draft("Notes", "general"), upload).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedMedia { .. }));

    // Nothing was recorded and nothing was written.
    assert!(service.list().await.unwrap().is_empty());
    assert_eq!(std::fs::read_dir(layout.uploads_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_delete_unknown_id_leaves_file_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let layout = booted_layout(&tmp).await;
    let service = DesignService::new(&layout, Janitor::spawn(), Arc::new(FixedIdClock::new()));
    service
        .create(draft("Bridal Bloom", "bridal"), jpeg_upload("bloom.jpg"))
        .await
        .unwrap();
    let before = std::fs::read(layout.designs_file()).unwrap();

    let err = service.delete("no-such-id").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(std::fs::read(layout.designs_file()).unwrap(), before);
}

#[tokio::test]
async fn test_delete_removes_exactly_one_and_keeps_order() {
    let tmp = TempDir::new().unwrap();
    let layout = booted_layout(&tmp).await;
    let service = DesignService::new(&layout, Janitor::spawn(), Arc::new(FixedIdClock::new()));

    for (title, file) in [("One", "1.jpg"), ("Two", "2.jpg"), ("Three", "3.jpg")] {
        service
            .create(draft(title, "general"), jpeg_upload(file))
            .await
            .unwrap();
    }

    service.delete("id-1").await.unwrap();

    let remaining = service.list().await.unwrap();
    let titles: Vec<&str> = remaining.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, ["One", "Three"]);
}

#[tokio::test]
async fn test_delete_schedules_media_cleanup() {
    let tmp = TempDir::new().unwrap();
    let layout = booted_layout(&tmp).await;
    let service = DesignService::new(&layout, Janitor::spawn(), Arc::new(FixedIdClock::new()));

    let created = service
        .create(draft("Bridal Bloom", "bridal"), jpeg_upload("bloom.jpg"))
        .await
        .unwrap();
    let file_name = created.media_url.strip_prefix("/uploads/").unwrap();
    let stored = layout.uploads_dir().join(file_name);
    assert!(stored.exists());

    service.delete(&created.id).await.unwrap();

    // Cleanup is detached; poll briefly.
    for _ in 0..50 {
        if !stored.exists() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("media file was not cleaned up");
}

// =============================================================================
// Bookings
// =============================================================================

#[tokio::test]
async fn test_booking_create_defaults() {
    let tmp = TempDir::new().unwrap();
    let layout = booted_layout(&tmp).await;
    let service = BookingService::new(&layout, Arc::new(FixedIdClock::new()));

    let draft = BookingDraft {
        selected_design_ids: vec!["d1".to_string()],
        event_date: Some("   ".to_string()),
        ..booking_draft("Asha")
    };
    let booking = service.create(draft).await.unwrap();

    assert_eq!(booking.message, "");
    assert_eq!(booking.event_date, None, "blank date collapses to none");
    assert_eq!(booking.selected_design_ids, vec!["d1".to_string()]);
    assert_eq!(service.list().await.unwrap(), vec![booking]);
}

#[tokio::test]
async fn test_booking_ids_are_unique() {
    let tmp = TempDir::new().unwrap();
    let layout = booted_layout(&tmp).await;
    let service = BookingService::new(&layout, Arc::new(SystemIdClock));

    for i in 0..10 {
        service.create(booking_draft(&format!("guest{i}"))).await.unwrap();
    }

    let mut ids: Vec<String> = service
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids.len(), 10);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_booking_delete_and_clear() {
    let tmp = TempDir::new().unwrap();
    let layout = booted_layout(&tmp).await;
    let service = BookingService::new(&layout, Arc::new(FixedIdClock::new()));

    for name in ["Asha", "Meera", "Kiran"] {
        service.create(booking_draft(name)).await.unwrap();
    }

    service.delete("id-0").await.unwrap();
    assert_eq!(service.list().await.unwrap().len(), 2);

    let err = service.delete("id-0").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));

    service.clear().await.unwrap();
    assert!(service.list().await.unwrap().is_empty());
    assert_eq!(
        std::fs::read_to_string(layout.bookings_file()).unwrap().trim(),
        "[]"
    );
}

// =============================================================================
// End-to-end scenario: fresh environment through create and delete
// =============================================================================

#[tokio::test]
async fn test_fresh_environment_scenario() {
    let tmp = TempDir::new().unwrap();
    let layout = StorageLayout::Local {
        base: tmp.path().to_path_buf(),
    };
    bootstrap(&layout, Some("scenario-token"), DEFAULT_ADMIN_EMAIL)
        .await
        .unwrap();

    let service = DesignService::new(&layout, Janitor::spawn(), Arc::new(SystemIdClock));
    assert_eq!(service.list().await.unwrap(), vec![]);

    let created = service
        .create(draft("Bridal Bloom", "bridal"), jpeg_upload("bloom.jpg"))
        .await
        .unwrap();
    assert!(!created.id.is_empty());
    assert!(created.media_url.starts_with("/uploads/"));
    assert_eq!(created.category, "bridal");

    let listed = service.list().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);

    service.delete(&created.id).await.unwrap();
    assert_eq!(service.list().await.unwrap(), vec![]);
}
