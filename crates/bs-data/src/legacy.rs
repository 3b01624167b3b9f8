//! Legacy (markup) dataset extraction and validation.
//!
//! A legacy dataset is a calendar page in which every day carries a
//! `bs-date` marker followed by an `ad-date` marker:
//!
//! ```html
//! <td><span class="bs-date">2081-01-01</span><span class="ad-date">13 April 2024</span></td>
//! ```
//!
//! Extraction is tolerant: markers are found wherever a `class` attribute
//! contains `bs-date` / `ad-date`, attribute quotes may be single or double,
//! BS dates may be unpadded, and AD dates may spell the month in full or as
//! a three-letter abbreviation with or without a zero-padded day.  Each
//! `bs-date` marker pairs with the first `ad-date` marker after it and
//! before the next `bs-date` marker.

use std::sync::LazyLock;

use bs_calendar::{CalendarTable, DateIndex};
use bs_core::errors::{DataIntegrityError, ValidationError};
use bs_core::utilities::data_parsers::parse_date_str;
use bs_time::{AdDate, BsDate};
use regex::Regex;

static BS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)class\s*=\s*["'][^"']*\bbs-date\b[^"']*["'][^>]*>\s*([^<]*?)\s*<"#)
        .expect("bs-date marker pattern")
});

static AD_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)class\s*=\s*["'][^"']*\bad-date\b[^"']*["'][^>]*>\s*([^<]*?)\s*<"#)
        .expect("ad-date marker pattern")
});

/// Result of scanning a legacy dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyExtract {
    /// Valid `(bs, ad)` pairs in document order.
    pub pairs: Vec<(BsDate, AdDate)>,
    /// Number of `bs-date` markers seen.
    pub bs_markers: usize,
    /// Number of `ad-date` markers seen.
    pub ad_markers: usize,
    /// Markers that could not be turned into a valid pair.
    pub skipped: usize,
}

/// Scan `raw` for paired date markers.
pub fn extract(raw: &str) -> LegacyExtract {
    let bs: Vec<(usize, &str)> = markers(&BS_MARKER, raw);
    let ad: Vec<(usize, &str)> = markers(&AD_MARKER, raw);

    let mut pairs = Vec::with_capacity(bs.len());
    let mut skipped = 0;
    let mut next_ad = 0;
    for (i, &(start, bs_text)) in bs.iter().enumerate() {
        let end = bs.get(i + 1).map_or(usize::MAX, |&(s, _)| s);
        while next_ad < ad.len() && ad[next_ad].0 < start {
            next_ad += 1;
        }
        let partner = ad.get(next_ad).filter(|&&(s, _)| s < end);
        let pair = partner.and_then(|&(_, ad_text)| Some((parse_bs(bs_text)?, parse_ad(ad_text)?)));
        match pair {
            Some(p) => pairs.push(p),
            None => skipped += 1,
        }
        if partner.is_some() {
            next_ad += 1;
        }
    }

    LegacyExtract {
        pairs,
        bs_markers: bs.len(),
        ad_markers: ad.len(),
        skipped,
    }
}

fn markers<'a>(re: &Regex, raw: &'a str) -> Vec<(usize, &'a str)> {
    re.captures_iter(raw)
        .filter_map(|c| {
            let whole = c.get(0)?;
            Some((whole.start(), c.get(1)?.as_str()))
        })
        .collect()
}

fn parse_bs(text: &str) -> Option<BsDate> {
    let (y, m, d) = parse_date_str(text)?;
    BsDate::new_bounded(y, m, d).ok()
}

fn parse_ad(text: &str) -> Option<AdDate> {
    AdDate::from_long_format(text).or_else(|| text.parse().ok())
}

/// Check that `raw` is fit to become the active legacy dataset.
///
/// Returns the number of distinct BS dates, which is the number of entries
/// the dataset will contribute once loaded.  Never touches any loaded
/// state.
///
/// # Errors
/// * [`ValidationError::MissingMarkers`] if either marker kind is absent.
/// * [`ValidationError::Conflicting`] if the pairs contradict each other.
/// * [`ValidationError::TooFewEntries`] if fewer than `min_entries`
///   distinct dates are found.
pub fn validate_legacy_dataset(raw: &[u8], min_entries: usize) -> Result<usize, ValidationError> {
    let text = String::from_utf8_lossy(raw);
    let found = extract(&text);
    if found.bs_markers == 0 || found.ad_markers == 0 {
        return Err(ValidationError::MissingMarkers);
    }
    let count = DateIndex::build(found.pairs)?.len();
    if count < min_entries {
        return Err(ValidationError::TooFewEntries {
            found: count,
            required: min_entries,
        });
    }
    Ok(count)
}

/// Parse a legacy dataset into a month-length table and date index.
///
/// The table is inferred from the index (see
/// [`CalendarTable::derive_from_index`]).
///
/// # Errors
/// [`DataIntegrityError::Malformed`] if no valid pair is found;
/// [`DataIntegrityError::AmbiguousMapping`] if the pairs contradict each
/// other.
pub fn parse_legacy(raw: &str) -> Result<(CalendarTable, DateIndex), DataIntegrityError> {
    let found = extract(raw);
    if found.pairs.is_empty() {
        return Err(DataIntegrityError::Malformed(
            "no valid bs-date/ad-date pairs".into(),
        ));
    }
    let index = DateIndex::build(found.pairs)?;
    let table = CalendarTable::derive_from_index(&index);
    Ok((table, index))
}

/// Render pairs as a legacy dataset, one table row per BS month.
pub fn render_legacy<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = &'a (BsDate, AdDate)>,
{
    let mut out = String::from("<table class=\"calendar\">\n");
    let mut current: Option<(i32, u8)> = None;
    for (bs, ad) in pairs {
        let month = (bs.year(), bs.month());
        if current != Some(month) {
            if current.is_some() {
                out.push_str("</tr>\n");
            }
            out.push_str("<tr>");
            current = Some(month);
        }
        out.push_str(&format!(
            "<td><span class=\"bs-date\">{bs}</span><span class=\"ad-date\">{}</span></td>",
            ad.long_format()
        ));
    }
    if current.is_some() {
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}
