//! `AdDate` — a Gregorian calendar date.
//!
//! Dates are stored as a serial number of days since the Unix epoch
//! (1970-01-01 = serial 0), which makes day arithmetic and day counting a
//! plain integer operation.  The supported range is 0001-01-01 to
//! 9999-12-31 in the proleptic Gregorian calendar.
//!
//! `Display` and serde both use the canonical `YYYY-MM-DD` form.

use std::str::FromStr;

use bs_core::errors::ConversionError;
use bs_core::utilities::data_formatters::format_ymd;
use bs_core::utilities::data_parsers::{parse_date_str, split_day_month_year};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::month::Month;

/// A Gregorian date represented as a day serial.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdDate(i32);

impl AdDate {
    /// Earliest supported date: 0001-01-01.
    pub const MIN: AdDate = AdDate(-719_162);

    /// Latest supported date: 9999-12-31.
    pub const MAX: AdDate = AdDate(2_932_896);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ConversionError> {
        let invalid = || ConversionError::InvalidDate { year, month, day };
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(invalid());
        }
        if day == 0 || day > days_in_month(year, month as u8) as u32 {
            return Err(invalid());
        }
        Ok(AdDate(serial_from_ymd(year, month, day)))
    }

    /// Compile-time constructor for known-valid constants.
    ///
    /// # Panics
    /// Panics (at compile time when used in a `const`) if the date is invalid.
    pub const fn from_ymd_const(year: i32, month: u32, day: u32) -> Self {
        assert!(year >= 1 && year <= 9999 && month >= 1 && month <= 12);
        assert!(day >= 1 && day <= days_in_month(year, month as u8) as u32);
        AdDate(serial_from_ymd(year, month, day))
    }

    /// Create a date from a serial number (days since 1970-01-01).
    pub fn from_serial(serial: i32) -> Result<Self, ConversionError> {
        let d = AdDate(serial);
        if d < Self::MIN || d > Self::MAX {
            return Err(ConversionError::OutOfRange(format!(
                "serial {serial} outside 0001-01-01..=9999-12-31"
            )));
        }
        Ok(d)
    }

    /// Parse a human-readable `day month-name year` form such as
    /// `"17 July 2025"`, `"07 Jul 2025"` or `"7 Jul. 2025"`.
    pub fn from_long_format(s: &str) -> Option<Self> {
        let (day, name, year) = split_day_month_year(s)?;
        let month = Month::from_name(name)?;
        Self::from_ymd(year, month.number() as u32, day).ok()
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return `(year, month, day)`.
    pub fn ymd(&self) -> (i32, u8, u8) {
        ymd_from_serial(self.0)
    }

    /// Return the year.
    pub fn year(&self) -> i32 {
        self.ymd().0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.ymd().2
    }

    /// Format as `"17 July 2025"`.
    pub fn long_format(&self) -> String {
        let (y, m, d) = self.ymd();
        let name = Month::from_number(m).map_or("", |m| m.long_name());
        format!("{d} {name} {y}")
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i64) -> Result<Self, ConversionError> {
        let serial = self.0 as i64 + n;
        if serial < Self::MIN.0 as i64 || serial > Self::MAX.0 as i64 {
            return Err(ConversionError::OutOfRange(format!(
                "{self} {n:+} days leaves 0001-01-01..=9999-12-31"
            )));
        }
        Ok(AdDate(serial as i32))
    }

    /// Return the number of days from `self` to `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: AdDate) -> i64 {
        other.0 as i64 - self.0 as i64
    }
}

impl std::ops::Sub<AdDate> for AdDate {
    type Output = i64;
    fn sub(self, rhs: AdDate) -> i64 {
        rhs.days_between(self)
    }
}

// ── Text & serde ──────────────────────────────────────────────────────────────

impl std::fmt::Display for AdDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        f.write_str(&format_ymd(y, m as u32, d as u32))
    }
}

impl std::fmt::Debug for AdDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdDate({self})")
    }
}

impl FromStr for AdDate {
    type Err = ConversionError;

    /// Parse any spelling accepted by
    /// [`parse_date_str`](bs_core::utilities::data_parsers::parse_date_str).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m, d) = parse_date_str(s).ok_or(ConversionError::InvalidDate {
            year: 0,
            month: 0,
            day: 0,
        })?;
        Self::from_ymd(y, m, d)
    }
}

impl Serialize for AdDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AdDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid AD date {s:?}")))
    }
}

// ── chrono interop ────────────────────────────────────────────────────────────

#[cfg(feature = "chrono")]
impl From<AdDate> for chrono::NaiveDate {
    fn from(d: AdDate) -> Self {
        let (y, m, day) = d.ymd();
        // Every AdDate lies inside NaiveDate's range.
        chrono::NaiveDate::from_ymd_opt(y, m as u32, day as u32).unwrap_or_default()
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::NaiveDate> for AdDate {
    type Error = ConversionError;

    fn try_from(d: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;
        AdDate::from_ymd(d.year(), d.month(), d.day())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Whether a given Gregorian year is a leap year.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given Gregorian month.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Convert (year, month, day) to days since 1970-01-01.
const fn serial_from_ymd(year: i32, month: u32, day: u32) -> i32 {
    // Years start in March so the leap day is the last day of the year.
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y.rem_euclid(400);
    let mp = (month as i32 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i32 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Decompose days since 1970-01-01 into (year, month, day).
fn ymd_from_serial(serial: i32) -> (i32, u8, u8) {
    let z = serial + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i32::from(m <= 2);
    (y, m as u8, d as u8)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
