//! `BsDate` — a Bikram Sambat date.
//!
//! BS month lengths are not computable, so a `BsDate` on its own only knows
//! that its month is in 1..=12 and its day is at least 1.  Whether the day
//! actually exists in that month is answered by a month-length table.

use std::str::FromStr;

use bs_core::errors::ConversionError;
use bs_core::utilities::data_formatters::format_ymd;
use bs_core::utilities::data_parsers::parse_date_str;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest day number any BS month can have.
pub const MAX_MONTH_LENGTH: u8 = 32;

/// A Bikram Sambat date.
///
/// Ordering is chronological.  `Display` gives the canonical `YYYY-MM-DD`
/// string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BsDate {
    year: i32,
    month: u8,
    day: u8,
}

impl BsDate {
    /// Create a BS date, checking only that `month` is in 1..=12 and `day`
    /// is at least 1.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ConversionError> {
        if !(1..=12).contains(&month) || day == 0 || day > u8::MAX as u32 {
            return Err(ConversionError::InvalidDate { year, month, day });
        }
        Ok(BsDate {
            year,
            month: month as u8,
            day: day as u8,
        })
    }

    /// Compile-time constructor for known-valid constants.
    ///
    /// # Panics
    /// Panics (at compile time when used in a `const`) if `month` is not in
    /// 1..=12 or `day` is not in 1..=32.
    pub const fn from_ymd_const(year: i32, month: u8, day: u8) -> Self {
        assert!(month >= 1 && month <= 12 && day >= 1 && day <= MAX_MONTH_LENGTH);
        BsDate { year, month, day }
    }

    /// Like [`new`](Self::new) but additionally rejects days above 32, the
    /// longest possible BS month.  Used for dataset entries.
    pub fn new_bounded(year: i32, month: u32, day: u32) -> Result<Self, ConversionError> {
        if day > MAX_MONTH_LENGTH as u32 {
            return Err(ConversionError::InvalidDate { year, month, day });
        }
        Self::new(year, month, day)
    }

    /// Return the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Return the day of the month.
    pub fn day(&self) -> u8 {
        self.day
    }
}

impl std::fmt::Display for BsDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_ymd(self.year, self.month as u32, self.day as u32))
    }
}

impl std::fmt::Debug for BsDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BsDate({self})")
    }
}

impl FromStr for BsDate {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m, d) = parse_date_str(s).ok_or(ConversionError::InvalidDate {
            year: 0,
            month: 0,
            day: 0,
        })?;
        Self::new(y, m, d)
    }
}

impl Serialize for BsDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BsDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let (y, m, d) = parse_date_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid BS date {s:?}")))?;
        BsDate::new_bounded(y, m, d).map_err(serde::de::Error::custom)
    }
}
