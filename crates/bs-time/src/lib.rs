//! # bs-time
//!
//! Gregorian ([`AdDate`]) and Bikram Sambat ([`BsDate`]) date types, and
//! the Gregorian month names used by legacy calendar pages.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `BsDate` type.
pub mod bs_date;

/// `AdDate` type.
pub mod date;

/// `Month` — Gregorian months.
pub mod month;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use bs_date::BsDate;
pub use date::AdDate;
pub use month::Month;
