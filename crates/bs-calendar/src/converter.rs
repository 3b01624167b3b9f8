//! `Converter` — BS ⇄ AD date conversion.
//!
//! Each direction first asks the [`DateIndex`] for an exact answer.  On a
//! miss it counts days from the [`ReferenceAnchor`], taking month lengths
//! from the [`CalendarTable`]; years the table does not cover count as
//! twelve 30-day months in both directions.
//!
//! ```
//! use bs_calendar::{CalendarTable, Converter, DateIndex};
//!
//! let table = CalendarTable::new();
//! let index = DateIndex::new();
//! let conv = Converter::new(&table, &index);
//! assert_eq!(conv.bs_to_ad(2081, 1, 2).unwrap().to_string(), "2024-04-14");
//! ```

use bs_core::errors::ConversionError;
use bs_time::{AdDate, BsDate};
use serde::Serialize;
use tracing::trace;

use crate::anchor::ReferenceAnchor;
use crate::calendar_table::CalendarTable;
use crate::date_index::DateIndex;

/// How a conversion result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Exact hit in the date index.
    Exact,
    /// Day-count from the reference anchor.
    Approximate,
}

/// A converted date together with the [`Method`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conversion<T> {
    /// The converted date.
    pub date: T,
    /// How it was obtained.
    pub method: Method,
}

/// Converts dates using one table/index pair.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    table: &'a CalendarTable,
    index: &'a DateIndex,
    anchor: ReferenceAnchor,
}

impl<'a> Converter<'a> {
    /// Create a converter with the standard reference anchor.
    pub fn new(table: &'a CalendarTable, index: &'a DateIndex) -> Self {
        Self {
            table,
            index,
            anchor: ReferenceAnchor::default(),
        }
    }

    /// Replace the reference anchor.
    pub fn with_anchor(mut self, anchor: ReferenceAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// The reference anchor in use.
    pub fn anchor(&self) -> ReferenceAnchor {
        self.anchor
    }

    // ── BS → AD ───────────────────────────────────────────────────────────────

    /// Convert a BS date to AD.
    ///
    /// # Errors
    /// [`ConversionError::InvalidDate`] if `month` is outside 1..=12 or `day`
    /// is 0.  Days beyond the month length are accepted in fallback mode.
    /// [`ConversionError::OutOfRange`] if the result leaves the AD range.
    pub fn bs_to_ad(&self, year: i32, month: u32, day: u32) -> Result<AdDate, ConversionError> {
        self.bs_to_ad_detailed(year, month, day).map(|c| c.date)
    }

    /// [`bs_to_ad`](Self::bs_to_ad), also reporting the [`Method`].
    pub fn bs_to_ad_detailed(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Conversion<AdDate>, ConversionError> {
        let bs = BsDate::new(year, month, day)?;
        if let Some(ad) = self.index.lookup_bs_to_ad(&bs) {
            return Ok(Conversion {
                date: ad,
                method: Method::Exact,
            });
        }
        trace!(%bs, "index miss, counting days from anchor");
        let ad = self.anchor.ad().add_days(self.offset_from_anchor(&bs))?;
        Ok(Conversion {
            date: ad,
            method: Method::Approximate,
        })
    }

    /// Signed number of days from the anchor to `bs` by table arithmetic.
    pub fn offset_from_anchor(&self, bs: &BsDate) -> i64 {
        let anchor = self.anchor.bs();
        let (from, to) = (anchor.year(), bs.year());
        let whole_years = if to >= from {
            self.table.days_in_years(from..to)
        } else {
            -self.table.days_in_years(to..from)
        };
        whole_years + self.offset_in_year(bs) - self.offset_in_year(&anchor)
    }

    fn offset_in_year(&self, bs: &BsDate) -> i64 {
        let months: i64 = (1..bs.month())
            .map(|m| self.table.month_length(bs.year(), m) as i64)
            .sum();
        months + bs.day() as i64 - 1
    }

    // ── AD → BS ───────────────────────────────────────────────────────────────

    /// Convert an AD date to BS.
    ///
    /// # Errors
    /// [`ConversionError::InvalidDate`] if the input is not a real Gregorian
    /// date.
    pub fn ad_to_bs(&self, year: i32, month: u32, day: u32) -> Result<BsDate, ConversionError> {
        self.ad_to_bs_detailed(year, month, day).map(|c| c.date)
    }

    /// [`ad_to_bs`](Self::ad_to_bs), also reporting the [`Method`].
    pub fn ad_to_bs_detailed(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Conversion<BsDate>, ConversionError> {
        let ad = AdDate::from_ymd(year, month, day)?;
        self.convert_ad(ad)
    }

    /// Convert an already-validated [`AdDate`].
    pub fn convert_ad(&self, ad: AdDate) -> Result<Conversion<BsDate>, ConversionError> {
        if let Some(bs) = self.index.lookup_ad_to_bs(&ad) {
            return Ok(Conversion {
                date: bs,
                method: Method::Exact,
            });
        }
        trace!(%ad, "index miss, counting days from anchor");
        let anchor = self.anchor.bs();
        // Days since 1 Baisakh of the anchor year.
        let mut rem = self.anchor.ad().days_between(ad) + self.offset_in_year(&anchor);
        let mut year = anchor.year();
        while rem < 0 {
            year -= 1;
            rem += self.table.year_length(year) as i64;
        }
        loop {
            let len = self.table.year_length(year) as i64;
            if rem < len {
                break;
            }
            rem -= len;
            year += 1;
        }
        let mut month = 1u8;
        while month < 12 {
            let len = self.table.month_length(year, month) as i64;
            if rem < len {
                break;
            }
            rem -= len;
            month += 1;
        }
        let bs = BsDate::new(year, month as u32, rem as u32 + 1)?;
        Ok(Conversion {
            date: bs,
            method: Method::Approximate,
        })
    }

    /// Convert a [`BsDate`].
    pub fn convert_bs(&self, bs: BsDate) -> Result<Conversion<AdDate>, ConversionError> {
        self.bs_to_ad_detailed(bs.year(), bs.month() as u32, bs.day() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::REFERENCE_ANCHOR;

    const Y2080: [u8; 12] = [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30];
    const Y2081: [u8; 12] = [31, 31, 32, 32, 31, 30, 30, 30, 29, 30, 30, 30];

    fn ad(s: &str) -> AdDate {
        s.parse().unwrap()
    }

    #[test]
    fn no_data_plus_one_day() {
        let (t, i) = (CalendarTable::new(), DateIndex::new());
        let c = Converter::new(&t, &i);
        assert_eq!(c.bs_to_ad(2081, 1, 2).unwrap(), ad("2024-04-14"));
        assert_eq!(c.ad_to_bs(2024, 4, 14).unwrap().to_string(), "2081-01-02");
    }

    #[test]
    fn years_before_anchor_subtract() {
        let (t, i) = (CalendarTable::new(), DateIndex::new());
        let c = Converter::new(&t, &i);
        // 2080 is uncovered: 360 days before the anchor.
        assert_eq!(c.bs_to_ad(2080, 1, 1).unwrap(), ad("2023-04-19"));
        assert_eq!(c.ad_to_bs(2023, 4, 19).unwrap().to_string(), "2080-01-01");
        assert_eq!(c.ad_to_bs(2023, 4, 18).unwrap().to_string(), "2079-12-30");
    }

    #[test]
    fn table_lengths_drive_the_fallback() {
        let t = CalendarTable::from_entries([(2080, Y2080), (2081, Y2081)]).unwrap();
        let i = DateIndex::new();
        let c = Converter::new(&t, &i);
        // 2081 has 366 days, so 2082-01-01 = 2025-04-14.
        assert_eq!(c.bs_to_ad(2082, 1, 1).unwrap(), ad("2025-04-14"));
        // Shrawan 1, 2082 = Baisakh 1 + 94 days (2082 uncovered: 3 x 30 = 90).
        assert_eq!(c.bs_to_ad(2082, 4, 1).unwrap(), ad("2025-07-13"));
        // 2080 has 365 days.
        assert_eq!(c.bs_to_ad(2080, 1, 1).unwrap(), ad("2023-04-14"));
        assert_eq!(c.ad_to_bs(2024, 4, 12).unwrap().to_string(), "2080-12-30");
    }

    #[test]
    fn anchor_is_offset_zero() {
        let t = CalendarTable::from_entries([(2081, Y2081)]).unwrap();
        let i = DateIndex::new();
        let c = Converter::new(&t, &i);
        let got = c.convert_bs(REFERENCE_ANCHOR.bs()).unwrap();
        assert_eq!(got.date, REFERENCE_ANCHOR.ad());
        assert_eq!(got.method, Method::Approximate);
        assert_eq!(c.offset_from_anchor(&REFERENCE_ANCHOR.bs()), 0);
    }

    #[test]
    fn custom_anchor_mid_year() {
        let t = CalendarTable::new();
        let i = DateIndex::new();
        let anchor = ReferenceAnchor::new(BsDate::new(2081, 4, 10).unwrap(), ad("2024-07-25"));
        let c = Converter::new(&t, &i).with_anchor(anchor);
        assert_eq!(c.bs_to_ad(2081, 4, 10).unwrap(), ad("2024-07-25"));
        assert_eq!(c.bs_to_ad(2081, 4, 1).unwrap(), ad("2024-07-16"));
        assert_eq!(c.ad_to_bs(2024, 7, 16).unwrap().to_string(), "2081-04-01");
    }

    #[test]
    fn index_hit_wins_over_arithmetic() {
        let t = CalendarTable::new();
        let i = DateIndex::build([("2082-04-01".parse().unwrap(), ad("2025-07-17"))]).unwrap();
        let c = Converter::new(&t, &i);
        let got = c.bs_to_ad_detailed(2082, 4, 1).unwrap();
        assert_eq!(got, Conversion { date: ad("2025-07-17"), method: Method::Exact });
        let back = c.ad_to_bs_detailed(2025, 7, 17).unwrap();
        assert_eq!(back.date.to_string(), "2082-04-01");
        assert_eq!(back.method, Method::Exact);
    }

    #[test]
    fn invalid_input() {
        let (t, i) = (CalendarTable::new(), DateIndex::new());
        let c = Converter::new(&t, &i);
        assert!(matches!(c.bs_to_ad(2081, 13, 1), Err(ConversionError::InvalidDate { .. })));
        assert!(matches!(c.bs_to_ad(2081, 0, 1), Err(ConversionError::InvalidDate { .. })));
        assert!(matches!(c.bs_to_ad(2081, 1, 0), Err(ConversionError::InvalidDate { .. })));
        assert!(matches!(c.ad_to_bs(2023, 2, 29), Err(ConversionError::InvalidDate { .. })));
        // No upper-bound day check in fallback mode.
        assert_eq!(c.bs_to_ad(2081, 1, 31).unwrap(), ad("2024-05-13"));
    }

    #[test]
    fn far_years_run_out_of_range() {
        let (t, i) = (CalendarTable::new(), DateIndex::new());
        let c = Converter::new(&t, &i);
        assert!(matches!(c.bs_to_ad(20_000, 1, 1), Err(ConversionError::OutOfRange(_))));
    }

    #[test]
    fn extreme_years_fail_without_walking_the_span() {
        let t = CalendarTable::from_entries([(2080, Y2080), (2081, Y2081)]).unwrap();
        let i = DateIndex::new();
        let c = Converter::new(&t, &i);
        let started = std::time::Instant::now();
        for year in [200_000_000, -200_000_000, i32::MAX, i32::MIN] {
            assert!(
                matches!(c.bs_to_ad(year, 1, 1), Err(ConversionError::OutOfRange(_))),
                "{year}"
            );
        }
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }
}
