//! Engine configuration.
//!
//! [`EngineConfig`] names where the two datasets live and how strict
//! ingestion validation is.  It deserializes from TOML; every field has a
//! default, so an empty document is a valid configuration.
//!
//! ```toml
//! structured_path = "data/calendar.json"
//! legacy_path = "data/calendar.html"
//! min_entries = 100
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{Error, Result};

/// Default minimum number of valid pairs a legacy dataset must contain.
pub const DEFAULT_MIN_ENTRIES: usize = 100;

/// Configuration for the dataset loader and ingestion validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Path of the structured (JSON) dataset.
    #[serde(default = "default_structured_path")]
    pub structured_path: PathBuf,

    /// Path of the legacy (markup) dataset.
    #[serde(default = "default_legacy_path")]
    pub legacy_path: PathBuf,

    /// Minimum number of valid pairs a legacy dataset needs to pass
    /// validation.
    #[serde(default = "default_min_entries")]
    pub min_entries: usize,
}

fn default_structured_path() -> PathBuf {
    PathBuf::from("data/calendar.json")
}

fn default_legacy_path() -> PathBuf {
    PathBuf::from("data/calendar.html")
}

fn default_min_entries() -> usize {
    DEFAULT_MIN_ENTRIES
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            structured_path: default_structured_path(),
            legacy_path: default_legacy_path(),
            min_entries: default_min_entries(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Resolve both dataset paths against `base` when they are relative.
    pub fn rooted_at(mut self, base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        if self.structured_path.is_relative() {
            self.structured_path = base.join(&self.structured_path);
        }
        if self.legacy_path.is_relative() {
            self.legacy_path = base.join(&self.legacy_path);
        }
        self
    }
}
