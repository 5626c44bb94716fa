//! Storage root resolution.
//!
//! Decides, once at process start, which filesystem roots hold the JSON
//! collection files and the uploaded media. In a normal deployment both
//! live under the configured base directory. In an ephemeral deployment
//! (read-only source tree, e.g. serverless) the writable roots move to a
//! temp directory and the deployed copy is kept as a read-only origin for
//! seeding.

use std::path::{Path, PathBuf};

use crate::constants::{BOOKINGS_FILE, CONFIG_FILE, DATA_DIR, DESIGNS_FILE, UPLOADS_DIR};

/// Resolved storage roots, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLayout {
    /// Data and uploads live under the deployed tree.
    Local { base: PathBuf },
    /// Only `writable` can be written; `origin` is the read-only deployed
    /// copy used to seed it at startup.
    Ephemeral { writable: PathBuf, origin: PathBuf },
}

impl StorageLayout {
    /// Resolve the layout from the configured base directory and the
    /// ephemeral-environment indicator. Pure computation, no I/O.
    pub fn resolve(base: &Path, ephemeral: bool) -> Self {
        if ephemeral {
            Self::Ephemeral {
                writable: std::env::temp_dir().join("mehandi"),
                origin: base.to_path_buf(),
            }
        } else {
            Self::Local {
                base: base.to_path_buf(),
            }
        }
    }

    /// The writable base directory.
    pub fn base(&self) -> &Path {
        match self {
            Self::Local { base } => base,
            Self::Ephemeral { writable, .. } => writable,
        }
    }

    /// The read-only origin base, present only in ephemeral mode.
    pub fn origin(&self) -> Option<&Path> {
        match self {
            Self::Local { .. } => None,
            Self::Ephemeral { origin, .. } => Some(origin),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base().join(DATA_DIR)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.base().join(UPLOADS_DIR)
    }

    pub fn designs_file(&self) -> PathBuf {
        self.data_dir().join(DESIGNS_FILE)
    }

    pub fn bookings_file(&self) -> PathBuf {
        self.data_dir().join(BOOKINGS_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir().join(CONFIG_FILE)
    }

    pub fn origin_data_dir(&self) -> Option<PathBuf> {
        self.origin().map(|origin| origin.join(DATA_DIR))
    }

    pub fn origin_uploads_dir(&self) -> Option<PathBuf> {
        self.origin().map(|origin| origin.join(UPLOADS_DIR))
    }

    pub fn origin_config_file(&self) -> Option<PathBuf> {
        self.origin_data_dir().map(|dir| dir.join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_layout_paths() {
        let layout = StorageLayout::resolve(Path::new("/srv/mehandi"), false);
        assert_eq!(layout.base(), Path::new("/srv/mehandi"));
        assert_eq!(layout.data_dir(), PathBuf::from("/srv/mehandi/data"));
        assert_eq!(layout.uploads_dir(), PathBuf::from("/srv/mehandi/uploads"));
        assert_eq!(
            layout.designs_file(),
            PathBuf::from("/srv/mehandi/data/designs.json")
        );
        assert_eq!(
            layout.bookings_file(),
            PathBuf::from("/srv/mehandi/data/bookings.json")
        );
        assert_eq!(
            layout.config_file(),
            PathBuf::from("/srv/mehandi/data/config.json")
        );
        assert!(layout.origin().is_none());
        assert!(layout.origin_data_dir().is_none());
        assert!(layout.origin_uploads_dir().is_none());
    }

    #[test]
    fn test_ephemeral_layout_redirects_to_temp() {
        let layout = StorageLayout::resolve(Path::new("/var/task/backend"), true);
        assert!(layout.base().starts_with(std::env::temp_dir()));
        assert_eq!(layout.origin(), Some(Path::new("/var/task/backend")));
        assert_eq!(
            layout.origin_data_dir(),
            Some(PathBuf::from("/var/task/backend/data"))
        );
        assert_eq!(
            layout.origin_config_file(),
            Some(PathBuf::from("/var/task/backend/data/config.json"))
        );
        // Writable paths never point into the origin tree.
        assert!(!layout.designs_file().starts_with("/var/task/backend"));
    }

    #[test]
    fn test_collection_files_live_under_data_dir() {
        let layout = StorageLayout::resolve(Path::new("base"), false);
        assert!(layout.designs_file().starts_with(layout.data_dir()));
        assert!(layout.bookings_file().starts_with(layout.data_dir()));
        assert!(layout.config_file().starts_with(layout.data_dir()));
    }
}
