//! `Loader` — picks a dataset, parses it, and caches the result.
//!
//! Precedence is fixed: the structured dataset is authoritative whenever it
//! is present and parseable, even if a legacy dataset also exists and is
//! newer.  Failing that the legacy dataset is used; failing that the loader
//! publishes an empty [`ActiveSource`] of kind [`SourceKind::None`] and every
//! conversion falls back to day counting.  [`Loader::resolve`] never fails.
//!
//! The parsed [`ActiveSource`] lives in a [`SnapshotHandle`]: it is built
//! once, shared as an `Arc`, and replaced wholesale on
//! [`Loader::invalidate`].

use std::sync::Arc;

use bs_calendar::{CalendarTable, Converter, DateIndex};
use bs_core::errors::{DataIntegrityError, Result, ValidationError};
use bs_core::settings::DEFAULT_MIN_ENTRIES;
use bs_core::{EngineConfig, SnapshotHandle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::legacy::{parse_legacy, validate_legacy_dataset};
use crate::source::{DataSource, FileSource};
use crate::structured::{DateRange, StructuredDataset};

/// Which dataset an [`ActiveSource`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The structured (JSON) dataset.
    Structured,
    /// The legacy (markup) dataset.
    Legacy,
    /// No usable dataset.
    None,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceKind::Structured => "structured",
            SourceKind::Legacy => "legacy",
            SourceKind::None => "none",
        };
        f.write_str(name)
    }
}

/// The loaded calendar data: one table and one index from the same dataset.
#[derive(Debug, Clone)]
pub struct ActiveSource {
    kind: SourceKind,
    table: CalendarTable,
    index: DateIndex,
    date_range: Option<DateRange>,
}

impl ActiveSource {
    /// A source with no data.
    pub fn empty() -> Self {
        Self {
            kind: SourceKind::None,
            table: CalendarTable::new(),
            index: DateIndex::new(),
            date_range: None,
        }
    }

    /// Assemble a source from parsed parts.
    pub fn new(kind: SourceKind, table: CalendarTable, index: DateIndex) -> Self {
        let date_range = index.bs_range().map(|(min, max)| DateRange { min, max });
        Self {
            kind,
            table,
            index,
            date_range,
        }
    }

    /// Parse a structured dataset.
    pub fn from_structured(raw: &str) -> Result<Self, DataIntegrityError> {
        let (table, index, range) = StructuredDataset::from_json_str(raw)?.into_parts()?;
        let mut source = Self::new(SourceKind::Structured, table, index);
        if range.is_some() {
            source.date_range = range;
        }
        Ok(source)
    }

    /// Parse a legacy dataset.
    pub fn from_legacy(raw: &str) -> Result<Self, DataIntegrityError> {
        let (table, index) = parse_legacy(raw)?;
        Ok(Self::new(SourceKind::Legacy, table, index))
    }

    /// Which dataset this came from.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Month-length table.
    pub fn table(&self) -> &CalendarTable {
        &self.table
    }

    /// Exact date index.
    pub fn index(&self) -> &DateIndex {
        &self.index
    }

    /// Covered BS date range, if known.
    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    /// A converter over this source's table and index.
    pub fn converter(&self) -> Converter<'_> {
        Converter::new(&self.table, &self.index)
    }

    /// Export as a structured dataset.
    pub fn to_structured(&self) -> StructuredDataset {
        let mut ds = StructuredDataset::from_parts(&self.table, &self.index);
        if self.date_range.is_some() {
            ds.range = self.date_range;
        }
        ds
    }
}

/// Resolves and caches the [`ActiveSource`].
#[derive(Debug, Clone)]
pub struct Loader {
    source: Arc<dyn DataSource>,
    min_entries: usize,
    cache: SnapshotHandle<ActiveSource>,
}

impl Loader {
    /// Create a loader over `source`.
    pub fn new(source: impl DataSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    /// Create a loader over a shared `source`.
    pub fn from_arc(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            min_entries: DEFAULT_MIN_ENTRIES,
            cache: SnapshotHandle::new(),
        }
    }

    /// Create a loader reading the files named in `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(FileSource::from_config(config)).with_min_entries(config.min_entries)
    }

    /// Set the ingestion threshold.
    pub fn with_min_entries(mut self, min_entries: usize) -> Self {
        self.min_entries = min_entries;
        self
    }

    /// The ingestion threshold.
    pub fn min_entries(&self) -> usize {
        self.min_entries
    }

    /// The underlying data source.
    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    // ── Resolution ────────────────────────────────────────────────────────────

    /// Return the active source, loading it on first use.
    pub fn resolve(&self) -> Arc<ActiveSource> {
        self.cache.get_or_init(|| self.load())
    }

    /// Drop the cached source; the next [`resolve`](Self::resolve) reloads.
    pub fn invalidate(&self) {
        debug!("calendar source cache invalidated");
        self.cache.clear();
    }

    /// Load the structured dataset, `Ok(None)` if it does not exist.
    pub fn load_structured(&self) -> Result<Option<ActiveSource>> {
        match self.source.read_structured()? {
            Some(raw) => Ok(Some(ActiveSource::from_structured(&raw)?)),
            None => Ok(None),
        }
    }

    /// Load the legacy dataset, `Ok(None)` if it does not exist.
    pub fn load_legacy(&self) -> Result<Option<ActiveSource>> {
        match self.source.read_legacy()? {
            Some(raw) => Ok(Some(ActiveSource::from_legacy(&raw)?)),
            None => Ok(None),
        }
    }

    fn load(&self) -> ActiveSource {
        match self.load_structured() {
            Ok(Some(source)) => return loaded(source),
            Ok(None) => debug!("no structured dataset"),
            Err(e) => warn!(error = %e, "structured dataset unusable, trying legacy"),
        }
        match self.load_legacy() {
            Ok(Some(source)) => return loaded(source),
            Ok(None) => debug!("no legacy dataset"),
            Err(e) => warn!(error = %e, "legacy dataset unusable"),
        }
        warn!("no calendar dataset available, using day-count conversion only");
        ActiveSource::empty()
    }

    // ── Ingestion ─────────────────────────────────────────────────────────────

    /// Validate a candidate legacy dataset against this loader's threshold.
    pub fn validate(&self, raw: &[u8]) -> Result<usize, ValidationError> {
        validate_legacy_dataset(raw, self.min_entries)
    }

    /// Validate, parse, and store a new legacy dataset, then invalidate the
    /// cache.  Returns the number of valid pairs.
    ///
    /// All-or-nothing: on any error neither the stored dataset nor the
    /// active source changes.
    pub fn promote_legacy(&self, raw: &str) -> Result<usize> {
        let count = self.validate(raw.as_bytes())?;
        ActiveSource::from_legacy(raw)?;
        self.source.store_legacy(raw)?;
        self.invalidate();
        match self.source.read_structured() {
            Ok(Some(_)) => {
                warn!("structured dataset present; promoted legacy dataset stays inactive")
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "could not check for a structured dataset after promotion"),
        }
        info!(count, "legacy calendar dataset promoted");
        Ok(count)
    }
}

fn loaded(source: ActiveSource) -> ActiveSource {
    info!(
        kind = %source.kind(),
        entries = source.index().len(),
        years = source.table().len(),
        "calendar source loaded"
    );
    source
}
