//! # bs-calendar
//!
//! The BS ⇄ AD conversion core: the [`CalendarTable`] of month lengths, the
//! exact [`DateIndex`], the [`ReferenceAnchor`], and the [`Converter`] that
//! combines them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Reference anchor for day-count conversion.
pub mod anchor;

/// Per-year month-length table.
pub mod calendar_table;

/// BS ⇄ AD conversion.
pub mod converter;

/// Exact bidirectional date index.
pub mod date_index;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use anchor::{ReferenceAnchor, REFERENCE_ANCHOR};
pub use calendar_table::{CalendarTable, YearRange, DEFAULT_MONTH_LENGTH, DEFAULT_YEAR_RANGE};
pub use converter::{Conversion, Converter, Method};
pub use date_index::DateIndex;
