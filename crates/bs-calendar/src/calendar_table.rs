//! `CalendarTable` — per-year BS month lengths.
//!
//! The table is the authority on how long each BS month is.  Two lookups
//! deliberately disagree about years the table does not cover:
//!
//! * [`CalendarTable::month_length`] is lenient and answers
//!   [`DEFAULT_MONTH_LENGTH`] (30) so that day-count conversion can always
//!   proceed;
//! * [`CalendarTable::is_valid_date`] is strict and rejects every date in an
//!   uncovered year.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use bs_core::errors::DataIntegrityError;
use bs_core::{MonthLength, Year};
use bs_time::BsDate;
use serde::Serialize;
use tracing::debug;

use crate::date_index::DateIndex;

/// Month length assumed for every month of a year missing from the table.
pub const DEFAULT_MONTH_LENGTH: MonthLength = 30;

/// Shortest possible BS month.
pub const MIN_MONTH_LENGTH: MonthLength = 29;

/// Longest possible BS month.
pub const MAX_MONTH_LENGTH: MonthLength = 32;

/// Year range reported when the table is empty.
pub const DEFAULT_YEAR_RANGE: YearRange = YearRange {
    min: 2000,
    max: 2090,
};

/// An inclusive range of BS years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    /// First year.
    pub min: Year,
    /// Last year.
    pub max: Year,
}

impl YearRange {
    /// Return `true` if `year` lies inside the range.
    pub fn contains(&self, year: Year) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// Mapping from BS year to its twelve month lengths.
///
/// Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarTable {
    entries: BTreeMap<Year, [MonthLength; 12]>,
}

impl CalendarTable {
    /// Create an empty table.  Every lookup falls back to the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(year, lengths)` pairs.
    ///
    /// A later pair for the same year replaces an earlier one.
    ///
    /// # Errors
    /// [`DataIntegrityError::InvalidMonthLength`] if any length is outside
    /// 29..=32.
    pub fn from_entries<I>(entries: I) -> Result<Self, DataIntegrityError>
    where
        I: IntoIterator<Item = (Year, [MonthLength; 12])>,
    {
        let mut table = BTreeMap::new();
        for (year, lengths) in entries {
            for (i, &length) in lengths.iter().enumerate() {
                if !(MIN_MONTH_LENGTH..=MAX_MONTH_LENGTH).contains(&length) {
                    return Err(DataIntegrityError::InvalidMonthLength {
                        year,
                        month: i as u8 + 1,
                        length,
                    });
                }
            }
            table.insert(year, lengths);
        }
        Ok(Self { entries: table })
    }

    /// Infer month lengths from an exact date index.
    ///
    /// A year is included only when every one of its twelve months is fully
    /// present in the index: the days observed for the month are exactly
    /// `1..=n` with `n` in 29..=32.  Partially covered years are left out
    /// and therefore use the 30-day default.
    pub fn derive_from_index(index: &DateIndex) -> Self {
        let mut seen: BTreeMap<(Year, u8), (u8, usize)> = BTreeMap::new();
        for bs in index.bs_dates() {
            let slot = seen.entry((bs.year(), bs.month())).or_insert((0, 0));
            slot.0 = slot.0.max(bs.day());
            slot.1 += 1;
        }

        let mut entries = BTreeMap::new();
        let years: BTreeSet<Year> = seen.keys().map(|&(y, _)| y).collect();
        for year in years {
            let mut lengths = [0; 12];
            let complete = (1..=12u8).all(|m| match seen.get(&(year, m)) {
                Some(&(max, count)) => {
                    lengths[m as usize - 1] = max;
                    count == max as usize
                        && (MIN_MONTH_LENGTH..=MAX_MONTH_LENGTH).contains(&max)
                }
                None => false,
            });
            if complete {
                entries.insert(year, lengths);
            } else {
                debug!(year, "incomplete year in index, not added to month-length table");
            }
        }
        Self { entries }
    }

    // ── Lookups ───────────────────────────────────────────────────────────────

    /// Length of `month` (1–12) of `year`, or [`DEFAULT_MONTH_LENGTH`] when
    /// the year (or month number) is not in the table.
    pub fn month_length(&self, year: Year, month: u8) -> MonthLength {
        self.entries
            .get(&year)
            .and_then(|lengths| lengths.get((month as usize).checked_sub(1)?))
            .copied()
            .unwrap_or(DEFAULT_MONTH_LENGTH)
    }

    /// Number of days in `year` (360 for an uncovered year).
    pub fn year_length(&self, year: Year) -> u32 {
        (1..=12).map(|m| self.month_length(year, m) as u32).sum()
    }

    /// Total days in the years `years.start..years.end`.
    ///
    /// Only covered years are visited, so a span of any width costs time
    /// proportional to the table size.
    pub fn days_in_years(&self, years: Range<Year>) -> i64 {
        if years.is_empty() {
            return 0;
        }
        let span = years.end as i64 - years.start as i64;
        let (covered, days) = self
            .entries
            .range(years)
            .fold((0i64, 0i64), |(n, days), (_, lengths)| {
                (n + 1, days + lengths.iter().map(|&l| l as i64).sum::<i64>())
            });
        days + (span - covered) * 12 * DEFAULT_MONTH_LENGTH as i64
    }

    /// Return `true` if the date exists according to the table.
    ///
    /// Strict: any date in a year the table does not cover is invalid.
    pub fn is_valid_date(&self, year: Year, month: u32, day: u32) -> bool {
        self.contains_year(year)
            && (1..=12).contains(&month)
            && day >= 1
            && day <= self.month_length(year, month as u8) as u32
    }

    /// [`is_valid_date`](Self::is_valid_date) for a [`BsDate`].
    pub fn contains_date(&self, date: &BsDate) -> bool {
        self.is_valid_date(date.year(), date.month() as u32, date.day() as u32)
    }

    /// Return `true` if `year` has an entry.
    pub fn contains_year(&self, year: Year) -> bool {
        self.entries.contains_key(&year)
    }

    /// The covered year range, or [`DEFAULT_YEAR_RANGE`] when empty.
    pub fn year_range(&self) -> YearRange {
        match (self.entries.keys().next(), self.entries.keys().next_back()) {
            (Some(&min), Some(&max)) => YearRange { min, max },
            _ => DEFAULT_YEAR_RANGE,
        }
    }

    /// Covered years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.entries.keys().copied()
    }

    /// The full table, ordered by year.
    pub fn days_per_month_by_year(&self) -> &BTreeMap<Year, [MonthLength; 12]> {
        &self.entries
    }

    /// Number of covered years.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if no year is covered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
