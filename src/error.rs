//! Typed errors for the storage and admin-access layer.
//!
//! The HTTP layer maps these onto response statuses; the distinction
//! between "the file is gone" and "the record is gone" matters there,
//! so `NotFound` is its own kind rather than an I/O failure.

use std::path::{Path, PathBuf};

use crate::constants;

/// Result type for storage and admin-access operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Storage-layer errors with structured context.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Collection file missing, corrupt, or unwritable.
    #[error("storage unavailable at {path:?}: {reason}")]
    StorageUnavailable { path: PathBuf, reason: String },

    /// Admin config file missing or malformed at a point where bootstrap
    /// should already have fixed it.
    #[error("admin config unavailable at {path:?}: {reason}")]
    ConfigUnavailable { path: PathBuf, reason: String },

    /// Token rotation requested with a token under the minimum length.
    #[error("admin token must be at least {min} characters")]
    InvalidToken { min: usize },

    /// Lookup or delete by an id that is not in the collection.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Upload with a MIME type outside the accepted set.
    #[error("unsupported media type: {media_type}")]
    UnsupportedMedia { media_type: String },
}

impl Error {
    /// Create a storage error for a collection or media file.
    pub fn storage(path: &Path, reason: impl ToString) -> Self {
        Self::StorageUnavailable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create a config error for the admin config file.
    pub fn config(path: &Path, reason: impl ToString) -> Self {
        Self::ConfigUnavailable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid-token error carrying the configured minimum.
    pub fn invalid_token() -> Self {
        Self::InvalidToken {
            min: constants::MIN_TOKEN_LEN,
        }
    }

    /// Create a not-found error for a record kind and id.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create an unsupported-media error.
    pub fn unsupported_media(media_type: impl Into<String>) -> Self {
        Self::UnsupportedMedia {
            media_type: media_type.into(),
        }
    }
}

impl Error {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidToken { .. } | Self::UnsupportedMedia { .. } => 400,
            Self::StorageUnavailable { .. } | Self::ConfigUnavailable { .. } => 500,
        }
    }
}
