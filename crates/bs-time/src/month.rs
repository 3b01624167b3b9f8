//! `Month` — Gregorian months, as spelled in legacy calendar pages.

/// Gregorian month, numbered 1–12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

const ALL: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const LONG_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

impl Month {
    /// Month for `n` in 1..=12.
    pub fn from_number(n: u8) -> Option<Self> {
        ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// Look up a month by its English name.
    ///
    /// Case-insensitive; accepts the full name, the three-letter
    /// abbreviation, and `"Sept"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("sept") {
            return Some(Month::September);
        }
        ALL.into_iter().find(|m| {
            name.eq_ignore_ascii_case(m.long_name()) || name.eq_ignore_ascii_case(m.short_name())
        })
    }

    /// The 1-based month number.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// `"Jan"`, `"Feb"`, …
    pub fn short_name(&self) -> &'static str {
        &self.long_name()[..3]
    }

    /// `"January"`, `"February"`, …
    pub fn long_name(&self) -> &'static str {
        LONG_NAMES[usize::from(self.number()) - 1]
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.long_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_names() {
        for n in 1..=12u8 {
            assert_eq!(Month::from_number(n).unwrap().number(), n);
        }
        assert!(Month::from_number(0).is_none());
        assert!(Month::from_number(13).is_none());
        assert_eq!(Month::September.short_name(), "Sep");
        assert_eq!(Month::May.short_name(), "May");
    }

    #[test]
    fn from_name_is_tolerant() {
        assert_eq!(Month::from_name("July"), Some(Month::July));
        assert_eq!(Month::from_name("jul"), Some(Month::July));
        assert_eq!(Month::from_name("SEPT"), Some(Month::September));
        assert_eq!(Month::from_name(" december "), Some(Month::December));
        assert_eq!(Month::from_name("Ju"), None);
        assert_eq!(Month::from_name("Baisakh"), None);
    }
}
