//! Error types for bikram.
//!
//! Errors are grouped by where they arise: [`ConversionError`] for malformed
//! conversion input, [`DataIntegrityError`] for datasets whose content
//! contradicts itself, and [`ValidationError`] for candidate datasets that
//! fail the structural ingestion checks.  The top-level [`Error`] wraps all
//! of them together with I/O and configuration failures.

use thiserror::Error;

/// Error returned when a conversion request cannot be answered.
///
/// Never retried: callers treat it as "no result".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Month outside 1..=12, day below 1, or an impossible Gregorian date.
    #[error("invalid date {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year as supplied.
        year: i32,
        /// Month as supplied.
        month: u32,
        /// Day as supplied.
        day: u32,
    },

    /// The result falls outside the supported Gregorian range.
    #[error("conversion result out of range: {0}")]
    OutOfRange(String),
}

/// Error raised when a dataset contradicts itself.
///
/// An offending dataset is rejected wholesale; nothing from it is ingested.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataIntegrityError {
    /// One date maps to two different counterparts.
    #[error("ambiguous mapping for {key}: {first} vs {second}")]
    AmbiguousMapping {
        /// The date that appears with two counterparts.
        key: String,
        /// The counterpart seen first.
        first: String,
        /// The conflicting counterpart.
        second: String,
    },

    /// A month length outside 29..=32.
    #[error("invalid month length {length} for {year}-{month:02}")]
    InvalidMonthLength {
        /// BS year.
        year: i32,
        /// BS month (1-based).
        month: u8,
        /// Offending length.
        length: u8,
    },

    /// Structurally unreadable content.
    #[error("malformed dataset: {0}")]
    Malformed(String),
}

/// Error returned by ingestion validation of a legacy dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The paired `bs-date` / `ad-date` markers are not present.
    #[error("required date markers are missing")]
    MissingMarkers,

    /// Fewer valid pairs than the configured minimum.
    #[error("too few entries: found {found}, need at least {required}")]
    TooFewEntries {
        /// Number of valid pairs found.
        found: usize,
        /// Configured minimum.
        required: usize,
    },

    /// The entries contradict each other.
    #[error("conflicting entries: {0}")]
    Conflicting(#[from] DataIntegrityError),
}

/// The top-level error type used throughout bikram.
#[derive(Debug, Error)]
pub enum Error {
    /// See [`ConversionError`].
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// See [`DataIntegrityError`].
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),

    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O failure while reading or storing a dataset.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand `Result` type used throughout bikram.
pub type Result<T, E = Error> = std::result::Result<T, E>;
