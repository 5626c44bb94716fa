//! Domain records for designs, bookings, and the style catalogue.
//!
//! Records serialize in camelCase because the collection files (and the
//! frontend consuming the API) use that convention. Designs and bookings
//! are immutable after creation: mutations are create/delete only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One portfolio entry with its stored media reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// MIME type of the stored media file.
    pub media_type: String,
    /// Serving path of the stored media, e.g. `/uploads/<file>`.
    pub media_url: String,
    pub original_file_name: String,
    pub created_at: DateTime<Utc>,
}

fn default_category() -> String {
    "general".to_string()
}

/// Caller-supplied fields for a new design; the media file arrives
/// separately as a [`crate::media::MediaUpload`].
#[derive(Debug, Clone, Default)]
pub struct DesignDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// MIME hint from the caller. The type detected from the upload
    /// itself takes precedence; this is only a fallback.
    pub media_type: Option<String>,
}

/// One booking submission from the public site.
///
/// `selected_design_ids` is kept verbatim; the referenced designs may have
/// been deleted since submission and no referential integrity is enforced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub preferred_style: Option<String>,
    #[serde(default)]
    pub selected_design_ids: Vec<String>,
    #[serde(default)]
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Incoming booking submission. Every field is defaulted so that missing
/// required fields surface as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub preferred_style: Option<String>,
    #[serde(default)]
    pub selected_design_ids: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Source of generated ids and timestamps.
///
/// Production code uses [`SystemIdClock`]; tests pin both for
/// deterministic records.
pub trait IdClock: Send + Sync {
    fn new_id(&self) -> String;
    fn now(&self) -> DateTime<Utc>;
}

/// UUID v4 ids and the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdClock;

impl IdClock for SystemIdClock {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// One entry of the fixed mehandi style catalogue served at `/api/types`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MehandiStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// The styles offered by the studio. Static content, not persisted.
pub const MEHANDI_STYLES: [MehandiStyle; 5] = [
    MehandiStyle {
        id: "traditional",
        name: "Traditional Bridal Mehandi",
        description: "Intricate paisleys, lotus blooms, and fine detailing for bridal celebrations.",
    },
    MehandiStyle {
        id: "arabic",
        name: "Arabic Mehandi",
        description: "Flowing floral patterns with bold outlines and empty spaces for elegance.",
    },
    MehandiStyle {
        id: "indo-arabic",
        name: "Indo-Arabic Mehandi",
        description: "A fusion of Indian motifs with Arabic floral accents for festive occasions.",
    },
    MehandiStyle {
        id: "minimal",
        name: "Minimal & Contemporary",
        description: "Clean, modern designs with delicate detailing for intimate functions.",
    },
    MehandiStyle {
        id: "khatri",
        name: "Khatri Traditional",
        description: "Geometric shapes and symmetric patterns inspired by Khatri artisans.",
    },
];
