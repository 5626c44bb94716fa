//! Admin config persistence and token lifecycle.
//!
//! The config file is a singleton JSON object holding the shared admin
//! token and the notification recipient. [`ConfigStore`] is an explicit
//! handle passed to whoever needs it; there is no ambient global. The
//! token is the sole credential for all admin operations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use super::layout::StorageLayout;
use crate::constants::MIN_TOKEN_LEN;
use crate::error::{Error, Result};

/// Persisted admin configuration, one per deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfig {
    pub admin_token: String,
    pub admin_email: String,
}

/// Tolerant view of the config file used during bootstrap, where the file
/// may be absent, truncated, or missing fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    admin_token: Option<String>,
    #[serde(default)]
    admin_email: Option<String>,
}

/// Handle on the writable config file, with an optional read-only origin
/// fallback for ephemeral deployments.
pub struct ConfigStore {
    path: PathBuf,
    origin_path: Option<PathBuf>,
    lock: Mutex<()>,
}

impl ConfigStore {
    pub fn new(layout: &StorageLayout) -> Self {
        Self {
            path: layout.config_file(),
            origin_path: layout.origin_config_file(),
            lock: Mutex::new(()),
        }
    }

    /// Read and parse the config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigUnavailable`] if the file is missing or
    /// malformed; bootstrap is expected to have run first.
    pub async fn load(&self) -> Result<AdminConfig> {
        self.load_unlocked().await
    }

    /// Idempotent config bootstrap.
    ///
    /// Assigns a fresh token when the stored one is missing or under the
    /// minimum length, preferring `token_hint` when it qualifies; fills in
    /// `default_email` when the recipient is empty. The file is rewritten
    /// only when its content actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigUnavailable`] only on unrecoverable I/O
    /// failure while persisting the resolved config.
    pub async fn ensure(
        &self,
        token_hint: Option<&str>,
        default_email: &str,
    ) -> Result<AdminConfig> {
        let _guard = self.lock.lock().await;

        let mut needs_write = false;
        let original_raw = match self.read_raw_with_fallback(&mut needs_write).await {
            Some(raw) => raw,
            None => {
                needs_write = true;
                String::new()
            }
        };
        let raw: RawConfig = serde_json::from_str(&original_raw).unwrap_or_default();

        let admin_token = match raw.admin_token {
            Some(token) if token.trim().len() >= MIN_TOKEN_LEN => token,
            _ => {
                needs_write = true;
                fallback_token(token_hint)
            }
        };

        let admin_email = match raw.admin_email {
            Some(email) if !email.trim().is_empty() => email,
            _ => {
                needs_write = true;
                default_email.to_string()
            }
        };

        let config = AdminConfig {
            admin_token,
            admin_email,
        };

        let updated_raw = to_pretty(&config).map_err(|err| Error::config(&self.path, err))?;
        if needs_write || original_raw.trim() != updated_raw.trim() {
            self.write_raw(&updated_raw).await?;
        }

        Ok(config)
    }

    /// Replace the admin token. Effective the moment the file is
    /// persisted; no history of old tokens is kept.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidToken`] when the trimmed token is under the minimum
    /// length, [`Error::ConfigUnavailable`] on load or persist failure.
    pub async fn rotate(&self, new_token: &str) -> Result<()> {
        let trimmed = new_token.trim();
        if trimmed.len() < MIN_TOKEN_LEN {
            return Err(Error::invalid_token());
        }

        let _guard = self.lock.lock().await;
        let mut config = self.load_unlocked().await?;
        config.admin_token = trimmed.to_string();
        let raw = to_pretty(&config).map_err(|err| Error::config(&self.path, err))?;
        self.write_raw(&raw).await
    }

    /// Check a presented token against the stored one.
    ///
    /// The presented value is trimmed; empty always fails. Comparison is
    /// constant-time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigUnavailable`] if the config cannot be read.
    pub async fn verify(&self, presented: &str) -> Result<bool> {
        let presented = presented.trim();
        if presented.is_empty() {
            return Ok(false);
        }
        let config = self.load_unlocked().await?;
        let stored = config.admin_token.trim();
        Ok(stored.as_bytes().ct_eq(presented.as_bytes()).into())
    }

    /// The configured notification recipient.
    pub async fn admin_email(&self) -> Result<String> {
        Ok(self.load_unlocked().await?.admin_email)
    }

    async fn load_unlocked(&self) -> Result<AdminConfig> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| Error::config(&self.path, err))?;
        serde_json::from_str(&raw)
            .map_err(|err| Error::config(&self.path, format!("invalid JSON: {err}")))
    }

    /// Read the writable config as raw text, falling back to the origin
    /// copy in ephemeral deployments. A successful origin read flags the
    /// config for write-back to the writable root.
    async fn read_raw_with_fallback(&self, needs_write: &mut bool) -> Option<String> {
        if let Ok(raw) = tokio::fs::read_to_string(&self.path).await {
            return Some(raw);
        }
        if let Some(origin) = &self.origin_path
            && let Ok(raw) = tokio::fs::read_to_string(origin).await
        {
            *needs_write = true;
            return Some(raw);
        }
        None
    }

    async fn write_raw(&self, raw: &str) -> Result<()> {
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|err| Error::config(&self.path, err))
    }
}

fn to_pretty(config: &AdminConfig) -> serde_json::Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(config)?))
}

fn fallback_token(hint: Option<&str>) -> String {
    match hint.map(str::trim) {
        Some(hint) if hint.len() >= MIN_TOKEN_LEN => hint.to_string(),
        _ => {
            warn!(
                "no admin token provided; generating a temporary one. \
                 Rotate it via the admin dashboard."
            );
            format!("token-{}", Uuid::new_v4())
        }
    }
}
