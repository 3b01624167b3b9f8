//! # bs-core
//!
//! Core types, configuration, and error definitions for bikram.
//!
//! This crate provides the foundational building blocks shared across the
//! other crates in the workspace – the error hierarchy, the
//! [`SnapshotHandle`] used to publish loaded calendar data atomically,
//! [`EngineConfig`], and the canonical date-string boundary.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types.
pub mod errors;

/// Atomically swapped snapshot handle (`SnapshotHandle<T>`).
pub mod handle;

/// Engine configuration (dataset paths, validation threshold).
pub mod settings;

/// Date-string parsing and formatting.
pub mod utilities;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Calendar year (BS or AD).
pub type Year = i32;

/// Length of a BS month in days (29–32).
pub type MonthLength = u8;

/// Alias used for counts and sizes.
pub type Size = usize;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{ConversionError, DataIntegrityError, Error, Result, ValidationError};
pub use handle::SnapshotHandle;
pub use settings::EngineConfig;
