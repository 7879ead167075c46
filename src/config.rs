//! Picker settings
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. An optional JSON settings file (`--settings`)
//! 3. Command-line flags / environment variables
//!
//! ```json
//! {
//!   "base_url": "https://omniset.io",
//!   "catalog": "data/modules.json",
//!   "theme_file": "/home/me/.config/omniset/theme"
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogSource;
use crate::output::DEFAULT_BASE_URL;
use crate::theme::ThemeStore;

/// Default catalog location, relative to the working directory.
pub const DEFAULT_CATALOG: &str = "data/modules.json";

/// Effective picker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Public base URL used in generated commands and links
    pub base_url: String,
    /// Catalog file path or http(s) URL
    pub catalog: String,
    /// Theme flag file; the platform config dir is used when unset
    pub theme_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog: DEFAULT_CATALOG.to_string(),
            theme_file: None,
        }
    }
}

/// Values supplied on the command line. `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub catalog: Option<String>,
    pub theme_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path.as_ref()))?;

        let settings: Self =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;

        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize settings to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Resolve settings from an optional file plus overrides, then validate.
    pub fn resolve(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut settings = match file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        if let Some(base_url) = overrides.base_url {
            settings.base_url = base_url;
        }
        if let Some(catalog) = overrides.catalog {
            settings.catalog = catalog;
        }
        if overrides.theme_file.is_some() {
            settings.theme_file = overrides.theme_file;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let base_url = self.base_url.trim();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("Base URL must start with http:// or https://");
        }
        url::Url::parse(base_url).with_context(|| format!("Invalid base URL '{}'", base_url))?;

        if self.catalog.trim().is_empty() {
            anyhow::bail!("Catalog source must be specified");
        }

        Ok(())
    }

    pub fn catalog_source(&self) -> Result<CatalogSource> {
        Ok(self.catalog.parse::<CatalogSource>()?)
    }

    /// Theme flag store, if a location is known.
    pub fn theme_store(&self) -> Option<ThemeStore> {
        self.theme_file
            .clone()
            .or_else(ThemeStore::default_path)
            .map(ThemeStore::new)
    }
}
