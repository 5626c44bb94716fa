//! Server settings for the mehandi backend.
//!
//! Settings come from an optional `mehandi.toml` file with environment
//! overrides layered on top, then a validation pass that separates hard
//! errors from warnings the operator should see but can ignore.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;

/// Result of settings validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent startup.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Resolved server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Port the API listens on.
    pub port: u16,
    /// Browser origins allowed by CORS.
    pub client_origins: Vec<String>,
    /// Storage base directory holding `data/` and `uploads/`.
    pub base_dir: PathBuf,
    /// Whether only temporary storage is writable (serverless deploys).
    pub ephemeral: bool,
    /// Initial admin token used when bootstrapping a fresh config.
    pub admin_token_hint: Option<String>,
    /// Override recipient for booking notifications.
    pub admin_email: Option<String>,
    /// Port for the Prometheus exporter; disabled when unset.
    pub metrics_port: Option<u16>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: constants::DEFAULT_PORT,
            client_origins: vec![constants::DEFAULT_CLIENT_ORIGIN.to_string()],
            base_dir: PathBuf::from("."),
            ephemeral: false,
            admin_token_hint: None,
            admin_email: None,
            metrics_port: None,
        }
    }
}

impl Settings {
    /// Load settings: the given file, else `mehandi.toml` if present, else
    /// defaults; environment overrides are applied in every case.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read or
    /// parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::load_from(path)?,
            None if Path::new("mehandi.toml").exists() => {
                Self::load_from(Path::new("mehandi.toml"))?
            }
            None => Self::default(),
        };
        settings.apply_env();
        Ok(settings)
    }

    /// Load settings from the specified TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Layer environment variables over the loaded settings.
    ///
    /// `PORT`, `CLIENT_ORIGIN`, `ADMIN_TOKEN`, `ADMIN_EMAIL`,
    /// `MEHANDI_BASE_DIR`, `METRICS_PORT`, and the ephemeral indicators
    /// `VERCEL=1` / `MEHANDI_EPHEMERAL=1`.
    pub fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT")
            && let Ok(port) = port.parse()
        {
            self.port = port;
        }
        if let Ok(origin) = std::env::var("CLIENT_ORIGIN")
            && !origin.is_empty()
            && !self.client_origins.contains(&origin)
        {
            self.client_origins.push(origin);
        }
        if let Ok(token) = std::env::var("ADMIN_TOKEN")
            && !token.trim().is_empty()
        {
            self.admin_token_hint = Some(token.trim().to_string());
        }
        if let Ok(email) = std::env::var("ADMIN_EMAIL")
            && !email.trim().is_empty()
        {
            self.admin_email = Some(email.trim().to_string());
        }
        if matches!(std::env::var("VERCEL").ok().as_deref(), Some("1"))
            || matches!(std::env::var("MEHANDI_EPHEMERAL").ok().as_deref(), Some("1"))
        {
            self.ephemeral = true;
        }
        if let Ok(base) = std::env::var("MEHANDI_BASE_DIR")
            && !base.is_empty()
        {
            self.base_dir = PathBuf::from(base);
        }
        if let Ok(port) = std::env::var("METRICS_PORT")
            && let Ok(port) = port.parse()
        {
            self.metrics_port = Some(port);
        }
    }

    /// Validate settings before serving.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings cannot work at all: port 0, or
    /// the metrics exporter colliding with the API port.
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.port == 0 {
            errors.push("port cannot be 0. Use a valid port number (1-65535)".to_string());
        }

        if self.port < 1024 && self.port > 0 {
            warnings.push(format!(
                "port {} is a system/privileged port (< 1024); ports >= 1024 avoid permission issues",
                self.port
            ));
        }

        if let Some(metrics_port) = self.metrics_port {
            if metrics_port == self.port {
                errors.push(format!(
                    "metrics_port {metrics_port} collides with the API port"
                ));
            }
            if metrics_port == 0 {
                errors.push("metrics_port cannot be 0".to_string());
            }
        }

        if self.client_origins.is_empty() {
            warnings.push(
                "no client origins configured; browser requests will be blocked by CORS"
                    .to_string(),
            );
        }

        if let Some(hint) = &self.admin_token_hint
            && hint.trim().len() < constants::MIN_TOKEN_LEN
        {
            warnings.push(format!(
                "admin token hint is shorter than {} characters and will be ignored",
                constants::MIN_TOKEN_LEN
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Settings validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.port, constants::DEFAULT_PORT);
        assert_eq!(
            settings.client_origins,
            vec![constants::DEFAULT_CLIENT_ORIGIN.to_string()]
        );
        assert!(!settings.ephemeral);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
port = 9000
client_origins = ["https://mehandi.example.com"]
base_dir = "/srv/mehandi"
ephemeral = true
admin_email = "owner@example.com"
metrics_port = 9100
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.base_dir, PathBuf::from("/srv/mehandi"));
        assert!(settings.ephemeral);
        assert_eq!(settings.admin_email.as_deref(), Some("owner@example.com"));
        assert_eq!(settings.metrics_port, Some(9100));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings: Settings = toml::from_str("port = 3000").unwrap();
        assert_eq!(settings.port, 3000);
        assert_eq!(
            settings.client_origins,
            vec![constants::DEFAULT_CLIENT_ORIGIN.to_string()]
        );
    }

    #[test]
    fn test_validate_port_zero() {
        let settings: Settings = toml::from_str("port = 0").unwrap();
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("port cannot be 0"));
    }

    #[test]
    fn test_validate_metrics_port_collision() {
        let settings: Settings = toml::from_str("port = 8080\nmetrics_port = 8080").unwrap();
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("collides"));
    }

    #[test]
    fn test_validate_privileged_port_warns() {
        let settings: Settings = toml::from_str("port = 80").unwrap();
        let result = settings.validate().unwrap();
        assert!(result.has_warnings());
    }

    #[test]
    fn test_validate_short_hint_warns() {
        let mut settings = Settings::default();
        settings.admin_token_hint = Some("ab".to_string());
        let result = settings.validate().unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("ignored")));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = Settings::load_from(Path::new("/definitely/not/here.toml"));
        assert!(err.is_err());
    }
}
