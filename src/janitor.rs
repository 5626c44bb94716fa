//! Detached best-effort filesystem cleanup.
//!
//! Deleting a design must not wait on (or fail because of) the removal of
//! its media file. Removals are queued to a single detached worker whose
//! outcomes are only logged; a failed removal leaves an orphaned file
//! without affecting record-store consistency.

use std::path::PathBuf;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, warn};

/// Queue of fire-and-forget file removals.
#[derive(Debug, Clone)]
pub struct Janitor {
    tx: UnboundedSender<PathBuf>,
}

impl Janitor {
    /// Spawn the worker task and return a handle to its queue.
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<PathBuf>();
        tokio::spawn(async move {
            while let Some(path) = rx.recv().await {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => debug!(path = %path.display(), "removed orphaned media file"),
                    Err(err) => {
                        warn!(path = %path.display(), %err, "failed to remove media file");
                    }
                }
            }
        });
        Self { tx }
    }

    /// Schedule a file for removal. Never blocks and never fails the
    /// caller; the outcome is only logged.
    pub fn schedule_remove(&self, path: PathBuf) {
        if self.tx.send(path).is_err() {
            warn!("cleanup worker is gone; dropping removal request");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn wait_until_gone(path: &std::path::Path) -> bool {
        for _ in 0..50 {
            if !path.exists() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_scheduled_file_is_removed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stale.jpg");
        std::fs::write(&path, b"bytes").unwrap();

        let janitor = Janitor::spawn();
        janitor.schedule_remove(path.clone());

        assert!(wait_until_gone(&path).await);
    }

    #[tokio::test]
    async fn test_missing_file_does_not_wedge_the_worker() {
        let tmp = TempDir::new().unwrap();
        let janitor = Janitor::spawn();

        janitor.schedule_remove(tmp.path().join("never-existed.jpg"));

        // The worker must keep draining after a failed removal.
        let path = tmp.path().join("real.jpg");
        std::fs::write(&path, b"bytes").unwrap();
        janitor.schedule_remove(path.clone());
        assert!(wait_until_gone(&path).await);
    }
}
