//! `Engine` — the one conversion entry point.
//!
//! All string input passes through
//! [`parse_date_str`](bs_core::utilities::data_parsers::parse_date_str) and
//! all string output is the canonical `YYYY-MM-DD` form, so two callers
//! handed the same engine can never disagree on formatting.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use bs_calendar::{Conversion, YearRange};
use bs_core::errors::Result;
use bs_core::utilities::data_parsers::parse_date_str;
use bs_core::{EngineConfig, MonthLength, Year};
use bs_data::{ActiveSource, DateRange, Loader, SourceKind};
use bs_time::{AdDate, BsDate};
use serde::Serialize;
use tracing::debug;

/// Read-only view of the loaded calendar data, for display.
///
/// Not meant to drive conversions; use the [`Engine`] for those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarInfo {
    /// Which dataset is active.
    pub source_kind: SourceKind,
    /// Number of exact date pairs.
    pub entry_count: usize,
    /// Years covered by the month-length table.
    pub year_range: YearRange,
    /// BS dates covered by the index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Month lengths per covered year.
    pub days_per_month_by_year: BTreeMap<Year, [MonthLength; 12]>,
}

/// Outcome of [`Engine::validate_dataset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Whether the dataset may be promoted.
    pub valid: bool,
    /// Number of valid date pairs found.
    pub count: usize,
    /// Why the dataset was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// BS ⇄ AD conversion over a [`Loader`].
#[derive(Debug, Clone)]
pub struct Engine {
    loader: Loader,
}

impl Engine {
    /// Create an engine over `loader`.
    pub fn new(loader: Loader) -> Self {
        Self { loader }
    }

    /// Create an engine reading the files named in `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Loader::from_config(config))
    }

    /// Create an engine from a TOML configuration file.  Relative dataset
    /// paths resolve against the file's directory.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = EngineConfig::from_toml_file(path)?;
        if let Some(dir) = path.parent() {
            config = config.rooted_at(dir);
        }
        Ok(Self::from_config(&config))
    }

    /// The underlying loader.
    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    /// The currently active data snapshot.
    pub fn active_source(&self) -> Arc<ActiveSource> {
        self.loader.resolve()
    }

    // ── String API ────────────────────────────────────────────────────────────

    /// Convert a BS date string to a canonical AD date string.
    ///
    /// `None` for unparseable input or an invalid BS month/day.
    pub fn convert_bs_to_ad(&self, bs: &str) -> Option<String> {
        let (y, m, d) = parse_date_str(bs)?;
        match self.bs_to_ad(y, m, d) {
            Ok(c) => Some(c.date.to_string()),
            Err(e) => {
                debug!(input = bs, error = %e, "bs to ad conversion failed");
                None
            }
        }
    }

    /// Convert an AD date string to a canonical BS date string.
    ///
    /// `None` for unparseable input or an invalid Gregorian date.
    pub fn convert_ad_to_bs(&self, ad: &str) -> Option<String> {
        let (y, m, d) = parse_date_str(ad)?;
        match self.ad_to_bs(y, m, d) {
            Ok(c) => Some(c.date.to_string()),
            Err(e) => {
                debug!(input = ad, error = %e, "ad to bs conversion failed");
                None
            }
        }
    }

    // ── Typed API ─────────────────────────────────────────────────────────────

    /// Convert BS to AD, reporting how the answer was obtained.
    pub fn bs_to_ad(&self, year: i32, month: u32, day: u32) -> Result<Conversion<AdDate>> {
        let source = self.loader.resolve();
        Ok(source.converter().bs_to_ad_detailed(year, month, day)?)
    }

    /// Convert AD to BS, reporting how the answer was obtained.
    pub fn ad_to_bs(&self, year: i32, month: u32, day: u32) -> Result<Conversion<BsDate>> {
        let source = self.loader.resolve();
        Ok(source.converter().ad_to_bs_detailed(year, month, day)?)
    }

    // ── Introspection ─────────────────────────────────────────────────────────

    /// Describe the active dataset.
    pub fn calendar_info(&self) -> CalendarInfo {
        let source = self.loader.resolve();
        CalendarInfo {
            source_kind: source.kind(),
            entry_count: source.index().len(),
            year_range: source.table().year_range(),
            date_range: source.date_range(),
            days_per_month_by_year: source.table().days_per_month_by_year().clone(),
        }
    }

    /// Serialize the active dataset as structured JSON.
    pub fn export_structured(&self) -> Result<String> {
        Ok(self.loader.resolve().to_structured().to_json_string()?)
    }

    // ── Ingestion ─────────────────────────────────────────────────────────────

    /// Check a candidate legacy dataset without changing anything.
    ///
    /// Runs the same checks as [`promote_dataset`](Self::promote_dataset);
    /// only a storage failure can make promotion of a `valid` dataset fail.
    pub fn validate_dataset(&self, raw: impl AsRef<[u8]>) -> ValidationReport {
        match self.loader.validate(raw.as_ref()) {
            Ok(count) => ValidationReport {
                valid: true,
                count,
                error: None,
            },
            Err(e) => ValidationReport {
                valid: false,
                count: 0,
                error: Some(e.to_string()),
            },
        }
    }

    /// Validate and store a legacy dataset, then reload.  Returns the number
    /// of valid pairs.
    pub fn promote_dataset(&self, raw: &str) -> Result<usize> {
        self.loader.promote_legacy(raw)
    }

    /// Drop the cached dataset so the next call re-reads storage.
    pub fn invalidate(&self) {
        self.loader.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bs_calendar::Method;
    use bs_data::MemorySource;

    fn engine(src: MemorySource) -> Engine {
        Engine::new(Loader::new(src))
    }

    #[test]
    fn bad_input_is_none() {
        let e = engine(MemorySource::new());
        for s in ["", "garbage", "2081-13-01", "2081-00-10", "2081-01-00", "81-01-01"] {
            assert_eq!(e.convert_bs_to_ad(s), None, "{s}");
        }
        for s in ["2023-02-29", "2024-13-01", "2024-04-31", "hello"] {
            assert_eq!(e.convert_ad_to_bs(s), None, "{s}");
        }
    }

    #[test]
    fn input_is_canonicalized() {
        let e = engine(MemorySource::new());
        let want = Some("2024-04-14".to_string());
        assert_eq!(e.convert_bs_to_ad("2081-01-02"), want);
        assert_eq!(e.convert_bs_to_ad(" 2081-1-2 "), want);
        assert_eq!(e.convert_bs_to_ad("2081/01/02"), want);
        assert_eq!(e.convert_bs_to_ad("२०८१-०१-०२"), want);
        assert_eq!(e.convert_ad_to_bs("2024.4.14").as_deref(), Some("2081-01-02"));
    }

    #[test]
    fn extreme_years_are_errors() {
        let e = engine(MemorySource::new());
        let err = e.bs_to_ad(200_000_000, 1, 1).unwrap_err();
        assert!(matches!(err, bs_core::Error::Conversion(_)));
    }

    #[test]
    fn method_is_reported() {
        let e = engine(MemorySource::new().with_structured(r#"{"mappings": {"2082-04-01": "2025-07-17"}}"#));
        assert_eq!(e.bs_to_ad(2082, 4, 1).unwrap().method, Method::Exact);
        assert_eq!(e.bs_to_ad(2082, 4, 2).unwrap().method, Method::Approximate);
    }

    #[test]
    fn validation_report() {
        let e = Engine::new(Loader::new(MemorySource::new()).with_min_entries(2));
        let raw = r#"<b class="bs-date">2081-01-01</b><b class="ad-date">13 April 2024</b>"#;
        let report = e.validate_dataset(raw);
        assert!(!report.valid);
        assert_eq!(report.error.as_deref(), Some("too few entries: found 1, need at least 2"));

        let ok = e.validate_dataset(format!(
            "{raw}<b class=\"bs-date\">2081-01-02</b><b class=\"ad-date\">14 April 2024</b>"
        ));
        assert_eq!(ok, ValidationReport { valid: true, count: 2, error: None });
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"valid":true,"count":2}"#);
        // Validation alone never changes the active source.
        assert_eq!(e.calendar_info().source_kind, SourceKind::None);
    }

    #[test]
    fn validation_agrees_with_promotion() {
        let e = Engine::new(Loader::new(MemorySource::new()).with_min_entries(100));
        let row = r#"<b class="bs-date">2081-01-01</b><b class="ad-date">13 April 2024</b>"#;
        let repeated = row.repeat(100);
        let report = e.validate_dataset(&repeated);
        assert!(!report.valid);
        assert!(e.promote_dataset(&repeated).is_err());

        let conflicting = format!(
            "{row}<b class=\"bs-date\">2081-01-01</b><b class=\"ad-date\">14 April 2024</b>"
        );
        let e = Engine::new(Loader::new(MemorySource::new()).with_min_entries(1));
        let report = e.validate_dataset(&conflicting);
        assert!(!report.valid);
        assert_eq!(
            report.error.as_deref(),
            Some("conflicting entries: ambiguous mapping for 2081-01-01: 2024-04-13 vs 2024-04-14")
        );
        assert!(e.promote_dataset(&conflicting).is_err());
        assert_eq!(e.calendar_info().source_kind, SourceKind::None);
    }

    #[test]
    fn calendar_info_shape() {
        let e = engine(MemorySource::new().with_structured(
            r#"{"mappings": {"2082-04-01": "2025-07-17"},
                "daysPerMonth": {"2082": [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30]}}"#,
        ));
        let info = e.calendar_info();
        assert_eq!(info.source_kind, SourceKind::Structured);
        assert_eq!(info.entry_count, 1);
        assert_eq!(info.year_range, YearRange { min: 2082, max: 2082 });
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["sourceKind"], "structured");
        assert_eq!(json["entryCount"], 1);
        assert_eq!(json["yearRange"]["min"], 2082);
        assert_eq!(json["daysPerMonthByYear"]["2082"][2], 32);
        assert_eq!(json["dateRange"]["min"], "2082-04-01");
    }
}
