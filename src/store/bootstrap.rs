//! Startup bootstrap for storage roots, seed data, and admin config.
//!
//! Runs once before any request is served and is safe to re-run. Directory
//! creation and the final config write are fatal; per-file seeding is
//! best-effort because an ephemeral environment may simply have no
//! pre-existing data to seed from.

use std::path::Path;
use tracing::{debug, info, warn};

use super::config::{AdminConfig, ConfigStore};
use super::layout::StorageLayout;
use crate::constants::{BOOKINGS_FILE, CONFIG_FILE, DESIGNS_FILE};
use crate::error::{Error, Result};

/// Ensure directories and collection files exist, seed an ephemeral root
/// from its origin, and resolve the admin config.
///
/// # Errors
///
/// Returns [`Error::StorageUnavailable`] if a storage directory cannot be
/// created, or [`Error::ConfigUnavailable`] if the resolved config cannot
/// be persisted. The process must not serve requests after either.
pub async fn bootstrap(
    layout: &StorageLayout,
    token_hint: Option<&str>,
    default_email: &str,
) -> Result<AdminConfig> {
    let data_dir = layout.data_dir();
    let uploads_dir = layout.uploads_dir();

    tokio::fs::create_dir_all(&data_dir)
        .await
        .map_err(|err| Error::storage(&data_dir, err))?;
    tokio::fs::create_dir_all(&uploads_dir)
        .await
        .map_err(|err| Error::storage(&uploads_dir, err))?;

    if let (Some(origin_data), Some(origin_uploads)) =
        (layout.origin_data_dir(), layout.origin_uploads_dir())
    {
        seed_data_files(&origin_data, &data_dir).await;
        seed_uploads(&origin_uploads, &uploads_dir).await;
    }

    for file in [layout.designs_file(), layout.bookings_file()] {
        let exists = tokio::fs::try_exists(&file)
            .await
            .map_err(|err| Error::storage(&file, err))?;
        if !exists {
            tokio::fs::write(&file, "[]")
                .await
                .map_err(|err| Error::storage(&file, err))?;
        }
    }

    let config = ConfigStore::new(layout)
        .ensure(token_hint, default_email)
        .await?;

    info!(
        data_dir = %data_dir.display(),
        uploads_dir = %uploads_dir.display(),
        "storage bootstrapped"
    );
    Ok(config)
}

/// Copy the collection files from the read-only origin into the writable
/// root, overwriting any existing copy. Absent files are skipped.
async fn seed_data_files(origin_data: &Path, data_dir: &Path) {
    for name in [DESIGNS_FILE, BOOKINGS_FILE, CONFIG_FILE] {
        let from = origin_data.join(name);
        let to = data_dir.join(name);
        match tokio::fs::read(&from).await {
            Ok(bytes) => {
                if let Err(err) = tokio::fs::write(&to, bytes).await {
                    warn!(file = name, %err, "failed to seed data file");
                }
            }
            Err(err) => debug!(file = name, %err, "no origin data file to seed"),
        }
    }
}

/// Copy every regular file in the origin uploads directory. Per-file
/// failures are logged and skipped; a missing origin directory is normal.
async fn seed_uploads(origin_uploads: &Path, uploads_dir: &Path) {
    let mut entries = match tokio::fs::read_dir(origin_uploads).await {
        Ok(entries) => entries,
        Err(err) => {
            debug!(%err, "no origin uploads to seed");
            return;
        }
    };

    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let from = entry.path();
                let is_file = entry
                    .file_type()
                    .await
                    .map(|t| t.is_file())
                    .unwrap_or(false);
                if !is_file {
                    continue;
                }
                let to = uploads_dir.join(entry.file_name());
                if let Err(err) = tokio::fs::copy(&from, &to).await {
                    warn!(file = %from.display(), %err, "failed to seed upload file");
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!(%err, "failed to read origin uploads directory");
                break;
            }
        }
    }
}
