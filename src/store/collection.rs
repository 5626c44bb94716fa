//! Whole-file JSON array persistence for one record collection.
//!
//! Every mutation reads the full array, modifies it in memory, and
//! rewrites the file as one unit; there is no incremental update path.
//! An in-process mutex serializes read-modify-write cycles against the
//! same collection. Nothing coordinates across processes: the deployment
//! model assumes a single active process per storage root, and concurrent
//! external writers race with last-write-wins.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::{Error, Result};

/// One on-disk JSON array of records.
pub struct Collection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind a collection to its file. The file itself is created by
    /// bootstrap, not here.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the file is missing or its
    /// content is not a valid JSON array; callers are expected to have
    /// bootstrapped the file first.
    pub async fn read_all(&self) -> Result<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    /// Overwrite the full collection with pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] on any I/O error.
    pub async fn write_all(&self, records: &[T]) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write_unlocked(records).await
    }

    /// Read-modify-write under the collection lock.
    ///
    /// The file is rewritten only when `mutate` succeeds; a failed
    /// mutation (e.g. unknown id) leaves the file untouched.
    pub async fn update<F, R>(&self, mutate: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R>,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.read_unlocked().await?;
        let out = mutate(&mut records)?;
        self.write_unlocked(&records).await?;
        Ok(out)
    }

    async fn read_unlocked(&self) -> Result<Vec<T>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| Error::storage(&self.path, err))?;
        serde_json::from_str(&raw)
            .map_err(|err| Error::storage(&self.path, format!("invalid JSON: {err}")))
    }

    async fn write_unlocked(&self, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|err| Error::storage(&self.path, err))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|err| Error::storage(&self.path, err))
    }
}
