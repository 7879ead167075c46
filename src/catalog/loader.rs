//! Catalog loading
//!
//! Reads the catalog document from a local file or, with the `remote`
//! feature, from an `http(s)` URL, then flattens it into a [`Catalog`].
//!
//! # Failure Modes
//!
//! Every failure (missing file, network error, malformed JSON) is returned
//! as an error. Nothing is retried and no partial catalog is produced; the
//! caller reports the error once and stops.

use super::{Catalog, CatalogDocument};
use crate::error::{OmniSetError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A JSON file on disk
    File(PathBuf),
    /// An `http://` or `https://` URL
    Remote(String),
}

impl FromStr for CatalogSource {
    type Err = OmniSetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(OmniSetError::catalog("Catalog source must not be empty"));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Remote(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// Load and flatten the catalog from `source`.
pub fn load(source: &CatalogSource) -> Result<Catalog> {
    info!("Loading module catalog from {}", source);

    let content = match source {
        CatalogSource::File(path) => std::fs::read_to_string(path)?,
        CatalogSource::Remote(url) => fetch(url)?,
    };

    let catalog = parse(&content)?;
    info!(
        categories = catalog.categories().len(),
        modules = catalog.module_count(),
        presets = catalog.presets().len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Parse a catalog document.
pub fn parse(content: &str) -> Result<Catalog> {
    let document: CatalogDocument = serde_json::from_str(content)?;
    debug!(
        "Parsed catalog document with {} categories",
        document.categories.len()
    );
    Ok(Catalog::new(document.categories, document.presets))
}

#[cfg(feature = "remote")]
fn fetch(url: &str) -> Result<String> {
    debug!("Fetching catalog over HTTP: {}", url);
    let response = ureq::get(url)
        .call()
        .map_err(|e| OmniSetError::fetch(format!("{}: {}", url, e)))?;
    Ok(response.into_string()?)
}

#[cfg(not(feature = "remote"))]
fn fetch(url: &str) -> Result<String> {
    Err(OmniSetError::catalog(format!(
        "Cannot fetch {}: built without the `remote` feature",
        url
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "categories": [
            { "id": "cli", "name": "CLI", "modules": [
                { "id": "git", "name": "Git", "description": "VCS",
                  "arch": ["x86_64", "arm64"], "size_mb": 5 }
            ]},
            { "id": "development", "name": "Development", "modules": [
                { "id": "vscode", "name": "VS Code", "description": "Editor",
                  "arch": ["x86_64"], "size_mb": 95.5, "requires": ["git"],
                  "tags": ["editor"] }
            ]}
        ]
    }"#;

    #[test]
    fn test_source_from_str() {
        assert_eq!(
            "https://omniset.io/api/modules.json".parse::<CatalogSource>().unwrap(),
            CatalogSource::Remote("https://omniset.io/api/modules.json".to_string())
        );
        assert_eq!(
            "data/modules.json".parse::<CatalogSource>().unwrap(),
            CatalogSource::File(PathBuf::from("data/modules.json"))
        );
        assert!("  ".parse::<CatalogSource>().is_err());
    }

    #[test]
    fn test_parse_flattens_modules() {
        let catalog = parse(DOCUMENT).unwrap();
        assert_eq!(catalog.module_count(), 2);
        assert_eq!(catalog.module("vscode").unwrap().category_id, "development");
        assert_eq!(catalog.module("vscode").unwrap().requires, vec!["git"]);
        assert_eq!(catalog.module("vscode").unwrap().size_mb, 95.5);
    }

    #[test]
    fn test_parse_presets_optional() {
        let catalog = parse(DOCUMENT).unwrap();
        assert!(catalog.presets().is_empty());
        assert!(catalog.module("git").unwrap().requires.is_empty());
        assert!(catalog.module("git").unwrap().tags.is_empty());
    }

    #[test]
    fn test_parse_malformed_document() {
        assert!(matches!(parse("{ not json"), Err(OmniSetError::Json(_))));
        // Missing required `categories`
        assert!(parse(r#"{ "presets": [] }"#).is_err());
        // Module without a size
        assert!(
            parse(r#"{ "categories": [{ "id": "a", "name": "A", "modules": [
                { "id": "x", "name": "X", "description": "" } ] }] }"#)
            .is_err()
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();

        let source = CatalogSource::File(file.path().to_path_buf());
        let catalog = load(&source).unwrap();
        assert!(catalog.contains("git"));
    }

    #[test]
    fn test_load_missing_file() {
        let source = CatalogSource::File(PathBuf::from("/nonexistent/omniset/modules.json"));
        assert!(matches!(load(&source), Err(OmniSetError::Io(_))));
    }
}
