//! Runtime settings, read from an optional `sow-architect.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::catalog::{Catalog, LogoAssets, Offering, builtin_offerings};
use crate::error::Error;
use crate::generate::RetryPolicy;

pub const DEFAULT_SETTINGS_FILE: &str = "sow-architect.toml";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub endpoint: String,
    pub model: String,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            model: "gemini-2.5-flash-preview-09-2025".into(),
            max_attempts: 5,
            base_delay_ms: 1000,
            timeout_secs: 120,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub assets_dir: PathBuf,
    pub generation: GenerationSettings,
    pub logos: LogoAssets,
    /// Replaces the built-in offering table when non-empty.
    pub offerings: Vec<Offering>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("diagrams"),
            generation: GenerationSettings::default(),
            logos: LogoAssets::default(),
            offerings: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from [`DEFAULT_SETTINGS_FILE`] in the
    /// working directory when it exists. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if !fallback.exists() {
                    log::debug!("No {DEFAULT_SETTINGS_FILE} found; using built-in settings");
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        let mut settings = Self::parse(&content)?;

        // Relative asset directories resolve against the settings file.
        if settings.assets_dir.is_relative()
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            settings.assets_dir = parent.join(&settings.assets_dir);
        }
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self, Error> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.generation.max_attempts == 0 {
            return Err(Error::Config("generation.max_attempts must be at least 1".into()));
        }
        if let Some(o) = self.offerings.iter().find(|o| o.name.trim().is_empty()) {
            return Err(Error::Config(format!("offering with empty name: {o:?}")));
        }
        Ok(())
    }

    pub fn catalog(&self) -> Catalog {
        let offerings = if self.offerings.is_empty() {
            builtin_offerings()
        } else {
            self.offerings.clone()
        };
        Catalog {
            assets_dir: self.assets_dir.clone(),
            logos: self.logos.clone(),
            offerings,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.generation.max_attempts,
            base_delay: Duration::from_millis(self.generation.base_delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.generation.timeout_secs)
    }
}
