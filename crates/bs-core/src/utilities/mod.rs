//! Miscellaneous utilities.

/// Canonical date-string formatting and numeral helpers.
pub mod data_formatters;

/// Canonical date-string parsing.
pub mod data_parsers;
