//! Data parsing helpers.
//!
//! [`parse_date_str`] is the canonicalization boundary for every date string
//! entering the engine: conversion input, dataset keys and dataset values all
//! pass through it, so two spellings of the same date always produce the
//! same key.

use super::data_formatters::from_devanagari_digits;

/// Parse a numeric date string into `(year, month, day)`.
///
/// Accepted forms: `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD`, with or without
/// zero-padding on month and day, surrounded by optional whitespace, written
/// in ASCII or Devanagari digits.  The year must have exactly four digits.
///
/// Only the shape is checked here; range checks belong to the date types.
///
/// ```
/// use bs_core::utilities::data_parsers::parse_date_str;
/// assert_eq!(parse_date_str("2081-1-2"), Some((2081, 1, 2)));
/// assert_eq!(parse_date_str(" 2081/01/02 "), Some((2081, 1, 2)));
/// assert_eq!(parse_date_str("02-01-2081"), None);
/// ```
pub fn parse_date_str(s: &str) -> Option<(i32, u32, u32)> {
    let s = from_devanagari_digits(s.trim());
    let sep = s.chars().find(|c| matches!(c, '-' | '/' | '.'))?;
    let mut parts = s.split(sep);
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 {
        return None;
    }
    Some((parse_digits(y)? as i32, parse_digits(m)?, parse_digits(d)?))
}

/// Split a human-readable `day month-name year` string into its parts.
///
/// Tolerates a trailing period after the month name and a comma before the
/// year (`"7 Jul. 2025"`, `"07 July, 2025"`).  The month name is returned
/// as written.
///
/// ```
/// use bs_core::utilities::data_parsers::split_day_month_year;
/// assert_eq!(split_day_month_year("07 July 2025"), Some((7, "July", 2025)));
/// assert_eq!(split_day_month_year("7 Jul. 2025"), Some((7, "Jul", 2025)));
/// ```
pub fn split_day_month_year(s: &str) -> Option<(u32, &str, i32)> {
    let mut words = s.split_whitespace();
    let day = parse_digits(words.next()?)?;
    let month = words.next()?.trim_end_matches([',', '.']);
    let year = parse_digits(words.next()?.trim_end_matches(','))?;
    if words.next().is_some() || month.is_empty() {
        return None;
    }
    Some((day, month, year as i32))
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
