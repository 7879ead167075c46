//! Output generation
//!
//! Projects a [`Selection`] into the three artifacts the picker hands to the
//! user: an install command, a configuration document and a share link.
//! All projections are pure; module ids are emitted in selection order and
//! are not escaped (they come from the catalog's own vocabulary).

use crate::selection::Selection;
use chrono::{DateTime, SecondsFormat, Utc};
use strum::{Display, EnumIter, EnumString};

/// File name used when the configuration document is downloaded.
pub const CONFIG_FILE_NAME: &str = "omniset-config.yaml";

/// Default public base URL.
pub const DEFAULT_BASE_URL: &str = "https://omniset.io";

/// Which artifact to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Command,
    Config,
    Share,
}

/// Builds the textual artifacts for a selection.
#[derive(Debug, Clone)]
pub struct OutputGenerator {
    base_url: String,
}

impl Default for OutputGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl OutputGenerator {
    /// Create a generator for `base_url` (a trailing `/` is dropped).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `curl -sL {base}/i | bash -s -- {ids}`
    pub fn install_command(&self, selection: &Selection) -> String {
        format!(
            "curl -sL {}/i | bash -s -- {}",
            self.base_url,
            selection.to_csv()
        )
    }

    /// Configuration document stamped with the current time.
    pub fn config_document(&self, selection: &Selection) -> String {
        self.config_document_at(selection, Utc::now())
    }

    /// Configuration document stamped with `generated`.
    pub fn config_document_at(&self, selection: &Selection, generated: DateTime<Utc>) -> String {
        let mut doc = String::from("# OmniSet Configuration\n");
        doc.push_str(&format!(
            "# Generated: {}\n\n",
            generated.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        doc.push_str("version: 1\n\n");
        doc.push_str("modules:\n");
        for id in selection.ids() {
            doc.push_str(&format!("  - {}\n", id));
        }
        doc
    }

    /// `{base}/builder?m={percent-encoded ids}`
    pub fn share_url(&self, selection: &Selection) -> String {
        format!(
            "{}/builder?m={}",
            self.base_url,
            urlencoding::encode(&selection.to_csv())
        )
    }

    /// Produce the artifact named by `kind`.
    pub fn render(&self, kind: OutputKind, selection: &Selection) -> String {
        match kind {
            OutputKind::Command => self.install_command(selection),
            OutputKind::Config => self.config_document(selection),
            OutputKind::Share => self.share_url(selection),
        }
    }
}
