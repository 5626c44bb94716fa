//! Upload storage for design media files.
//!
//! Media lives as a flat directory of files named
//! `<unix-millis>-<sanitized-original-name>`. In ephemeral deployments a
//! file may exist only in the read-only origin copy, so reads check the
//! writable root first and fall back to the origin.

use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::constants::ALLOWED_MEDIA_TYPES;
use crate::error::{Error, Result};
use crate::store::StorageLayout;

/// An uploaded media payload prior to storage.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub original_file_name: String,
    /// Content type reported by the upload machinery, if any.
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A stored media file and how to reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub file_name: String,
    pub media_url: String,
    pub media_type: String,
    pub original_file_name: String,
}

/// Handle on the uploads directory (and its read-only origin, if any).
#[derive(Debug, Clone)]
pub struct MediaStore {
    uploads_dir: PathBuf,
    origin_dir: Option<PathBuf>,
}

impl MediaStore {
    pub fn new(layout: &StorageLayout) -> Self {
        Self {
            uploads_dir: layout.uploads_dir(),
            origin_dir: layout.origin_uploads_dir(),
        }
    }

    /// Persist an upload under a timestamped, sanitized name.
    ///
    /// `stamp_millis` comes from the caller's clock so tests can pin file
    /// names. The MIME type must already have passed [`resolve_media_type`]
    /// and the allow-list check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the file cannot be written.
    pub async fn save(
        &self,
        upload: &MediaUpload,
        media_type: &str,
        stamp_millis: i64,
    ) -> Result<StoredMedia> {
        let file_name = format!(
            "{stamp_millis}-{}",
            sanitize_file_name(&upload.original_file_name)
        );
        let path = self.uploads_dir.join(&file_name);
        tokio::fs::write(&path, &upload.data)
            .await
            .map_err(|err| Error::storage(&path, err))?;

        Ok(StoredMedia {
            media_url: format!("/uploads/{file_name}"),
            file_name,
            media_type: media_type.to_string(),
            original_file_name: upload.original_file_name.clone(),
        })
    }

    /// Read a stored file for serving, returning its bytes and content
    /// type. Checks the writable root, then the origin root. `Ok(None)`
    /// when the file exists in neither.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] on I/O errors other than
    /// the file being absent.
    pub async fn open(&self, file_name: &str) -> Result<Option<(Vec<u8>, String)>> {
        // Never serve outside the uploads directories.
        let safe_name = match Path::new(file_name).file_name() {
            Some(name) => name.to_owned(),
            None => return Ok(None),
        };

        let mut candidates = vec![self.uploads_dir.join(&safe_name)];
        if let Some(origin) = &self.origin_dir {
            candidates.push(origin.join(&safe_name));
        }

        for path in candidates {
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let content_type = mime_guess::from_path(&path)
                        .first()
                        .map_or_else(|| "application/octet-stream".to_string(), |m| m.to_string());
                    return Ok(Some((bytes, content_type)));
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(Error::storage(&path, err)),
            }
        }
        Ok(None)
    }

    /// Map a stored `mediaUrl` back to its writable filesystem path.
    /// Returns `None` for URLs that do not point into the uploads root.
    pub fn path_for_url(&self, media_url: &str) -> Option<PathBuf> {
        let file_name = media_url.strip_prefix("/uploads/")?;
        let safe_name = Path::new(file_name).file_name()?;
        Some(self.uploads_dir.join(safe_name))
    }
}

/// Strip any path components and collapse whitespace to underscores.
pub fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let collapsed: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if collapsed.is_empty() {
        "upload".to_string()
    } else {
        collapsed
    }
}

/// Resolve the MIME type recorded for an upload.
///
/// The type detected from the uploaded file wins; the caller-supplied
/// field is only a fallback when detection is unavailable, and a guess
/// from the file extension sits between the two.
pub fn resolve_media_type(
    detected: Option<&str>,
    declared: Option<&str>,
    file_name: &str,
) -> String {
    if let Some(detected) = detected
        && detected.contains('/')
    {
        return detected.to_string();
    }
    if let Some(guessed) = mime_guess::from_path(file_name).first() {
        return guessed.to_string();
    }
    if let Some(declared) = declared
        && declared.contains('/')
    {
        return declared.to_string();
    }
    "application/octet-stream".to_string()
}

/// Check an upload's MIME type against the accepted set.
///
/// # Errors
///
/// Returns [`Error::UnsupportedMedia`] for anything outside the set.
pub fn check_media_type(media_type: &str) -> Result<()> {
    if ALLOWED_MEDIA_TYPES.contains(&media_type) {
        Ok(())
    } else {
        Err(Error::unsupported_media(media_type))
    }
}
