//! Data formatting helpers.
//!
//! [`format_ymd`] is the single place where a canonical `YYYY-MM-DD` date
//! string is produced; every date type's `Display` goes through it.

/// Format a date as the canonical `YYYY-MM-DD` string.
///
/// ```
/// use bs_core::utilities::data_formatters::format_ymd;
/// assert_eq!(format_ymd(2081, 1, 2), "2081-01-02");
/// ```
pub fn format_ymd(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

const DEVANAGARI_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

/// Replace Devanagari digits with ASCII digits, leaving everything else.
pub fn from_devanagari_digits(s: &str) -> String {
    s.chars()
        .map(|c| match DEVANAGARI_DIGITS.iter().position(|&d| d == c) {
            Some(i) => char::from(b'0' + i as u8),
            None => c,
        })
        .collect()
}
