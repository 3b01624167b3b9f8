//! # bs-data
//!
//! Calendar datasets: where they come from ([`DataSource`]), how they are
//! parsed (structured JSON or legacy markup), which one wins, and how a new
//! legacy dataset is validated and promoted.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Legacy markup extraction and ingestion validation.
pub mod legacy;

/// Dataset precedence, parsing, and the cached `ActiveSource`.
pub mod loader;

/// Raw dataset storage.
pub mod source;

/// Structured (JSON) dataset.
pub mod structured;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use legacy::{extract, parse_legacy, render_legacy, validate_legacy_dataset, LegacyExtract};
pub use loader::{ActiveSource, Loader, SourceKind};
pub use source::{DataSource, FileSource, MemorySource};
pub use structured::{DateRange, StructuredDataset};
