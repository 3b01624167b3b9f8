//! `DataSource` — where the raw datasets come from.
//!
//! The loader never touches storage directly; it asks a [`DataSource`] for
//! the raw text of each dataset.  [`FileSource`] reads the paths named in
//! [`EngineConfig`]; [`MemorySource`] holds the text in memory.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use bs_core::EngineConfig;

/// Read (and, for promotion, write) access to the raw datasets.
///
/// `Ok(None)` means the dataset does not exist; `Err` means it exists but
/// could not be read.
pub trait DataSource: std::fmt::Debug + Send + Sync {
    /// Raw text of the structured (JSON) dataset.
    fn read_structured(&self) -> io::Result<Option<String>>;

    /// Raw text of the legacy (markup) dataset.
    fn read_legacy(&self) -> io::Result<Option<String>>;

    /// Replace the legacy dataset with `raw`.
    ///
    /// Must be all-or-nothing: after an error the previous dataset is
    /// still intact.
    fn store_legacy(&self, raw: &str) -> io::Result<()>;
}

// ── FileSource ────────────────────────────────────────────────────────────────

/// Datasets stored as two files on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    structured_path: PathBuf,
    legacy_path: PathBuf,
}

impl FileSource {
    /// Create a source reading the given paths.
    pub fn new(structured_path: impl Into<PathBuf>, legacy_path: impl Into<PathBuf>) -> Self {
        Self {
            structured_path: structured_path.into(),
            legacy_path: legacy_path.into(),
        }
    }

    /// Create a source from the paths in `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.structured_path, &config.legacy_path)
    }

    /// Path of the structured dataset.
    pub fn structured_path(&self) -> &Path {
        &self.structured_path
    }

    /// Path of the legacy dataset.
    pub fn legacy_path(&self) -> &Path {
        &self.legacy_path
    }
}

fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

impl DataSource for FileSource {
    fn read_structured(&self) -> io::Result<Option<String>> {
        read_optional(&self.structured_path)
    }

    fn read_legacy(&self) -> io::Result<Option<String>> {
        read_optional(&self.legacy_path)
    }

    fn store_legacy(&self, raw: &str) -> io::Result<()> {
        if let Some(parent) = self.legacy_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        // Write beside the target and rename over it so readers never see a
        // half-written file.
        let mut tmp = self.legacy_path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.legacy_path).inspect_err(|_| {
            let _ = std::fs::remove_file(&tmp);
        })
    }
}

// ── MemorySource ──────────────────────────────────────────────────────────────

/// Datasets held in memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    structured: RwLock<Option<String>>,
    legacy: RwLock<Option<String>>,
}

impl MemorySource {
    /// Create a source with no datasets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the structured dataset.
    pub fn with_structured(self, raw: impl Into<String>) -> Self {
        self.set_structured(Some(raw.into()));
        self
    }

    /// Set the legacy dataset.
    pub fn with_legacy(self, raw: impl Into<String>) -> Self {
        *self.legacy.write().unwrap_or_else(PoisonError::into_inner) = Some(raw.into());
        self
    }

    /// Replace or remove the structured dataset.
    pub fn set_structured(&self, raw: Option<String>) {
        *self.structured.write().unwrap_or_else(PoisonError::into_inner) = raw;
    }
}

impl DataSource for MemorySource {
    fn read_structured(&self) -> io::Result<Option<String>> {
        Ok(self.structured.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn read_legacy(&self) -> io::Result<Option<String>> {
        Ok(self.legacy.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn store_legacy(&self, raw: &str) -> io::Result<()> {
        *self.legacy.write().unwrap_or_else(PoisonError::into_inner) = Some(raw.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_read_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let src = FileSource::new(dir.path().join("a.json"), dir.path().join("b.html"));
        assert!(src.read_structured().unwrap().is_none());
        assert!(src.read_legacy().unwrap().is_none());
    }

    #[test]
    fn store_legacy_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = dir.path().join("data").join("calendar.html");
        let src = FileSource::new(dir.path().join("calendar.json"), &legacy);
        src.store_legacy("first").unwrap();
        src.store_legacy("second").unwrap();
        assert_eq!(src.read_legacy().unwrap().as_deref(), Some("second"));
        assert!(!legacy.with_extension("html.tmp").exists());
    }

    #[test]
    fn memory_source_roundtrip() {
        let src = MemorySource::new().with_legacy("x");
        assert_eq!(src.read_legacy().unwrap().as_deref(), Some("x"));
        assert!(src.read_structured().unwrap().is_none());
        src.set_structured(Some("{}".into()));
        assert_eq!(src.read_structured().unwrap().as_deref(), Some("{}"));
        src.store_legacy("y").unwrap();
        assert_eq!(src.read_legacy().unwrap().as_deref(), Some("y"));
    }
}
