//! Settings loaded from `~/.config/visitorid/config.toml`.
//!
//! ```toml
//! [options]
//! preset = "standard"
//! audio = false
//! methodTimeout = 500
//!
//! [fields]
//! version = true
//!
//! [environment]
//! userAgent = "Mozilla/5.0 (X11; Linux x86_64)"
//! resolution = [1920, 1080]
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::env::{Environment, StaticEnvironment, SystemEnvironment};
use crate::error::Result;
use crate::fingerprint::{Fingerprinter, PartialOptions, ProfileFields};

/// Top-level settings file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Options used when the caller passes none of its own.
    pub options: PartialOptions,
    /// Fields included in the `basic` signal.
    pub fields: ProfileFields,
    /// Fixed readings to use instead of the host process.
    pub environment: Option<StaticEnvironment>,
}

impl Settings {
    /// Load from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Like [`Settings::load`], but an unreadable file is logged and replaced
    /// by defaults.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("ignoring settings at {}: {e}", config_path().display());
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Fingerprinter over the configured environment and field template.
    pub fn fingerprinter(&self) -> Fingerprinter {
        let env: Arc<dyn Environment> = match &self.environment {
            Some(snapshot) => Arc::new(snapshot.clone()),
            None => Arc::new(SystemEnvironment),
        };
        Fingerprinter::new(env).with_fields(self.fields.clone())
    }
}

/// Path to the settings file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("visitorid")
        .join("config.toml")
}
