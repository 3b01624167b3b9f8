//! Structured (JSON) dataset.
//!
//! ```json
//! {
//!   "mappings": { "2082-04-01": "2025-07-17" },
//!   "daysPerMonth": { "2082": [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30] },
//!   "range": { "min": "2082-04-01", "max": "2082-04-01" }
//! }
//! ```
//!
//! The shape maps one-to-one onto [`CalendarTable`] and [`DateIndex`]; no
//! month lengths are inferred.  Date strings are canonical on output.

use std::collections::BTreeMap;

use bs_calendar::{CalendarTable, DateIndex};
use bs_core::errors::DataIntegrityError;
use bs_core::{MonthLength, Year};
use bs_time::{AdDate, BsDate};
use serde::{Deserialize, Serialize};

/// Inclusive BS date range covered by a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date.
    pub min: BsDate,
    /// Last date.
    pub max: BsDate,
}

/// Deserialized form of the structured dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StructuredDataset {
    /// BS → AD mappings in document order.  Kept as a list so that two
    /// spellings of one BS date with different AD dates are caught by
    /// [`DateIndex::build`] instead of being collapsed by the map.
    #[serde(default, with = "mapping_pairs")]
    pub mappings: Vec<(BsDate, AdDate)>,

    /// Month lengths per BS year.
    #[serde(default)]
    pub days_per_month: BTreeMap<Year, [MonthLength; 12]>,

    /// Covered BS date range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
}

impl StructuredDataset {
    /// Parse the JSON text of a structured dataset.
    ///
    /// # Errors
    /// [`DataIntegrityError::Malformed`] if the text is not a dataset.
    pub fn from_json_str(s: &str) -> Result<Self, DataIntegrityError> {
        serde_json::from_str(s).map_err(|e| DataIntegrityError::Malformed(e.to_string()))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, DataIntegrityError> {
        serde_json::to_string_pretty(self).map_err(|e| DataIntegrityError::Malformed(e.to_string()))
    }

    /// Capture a table and index as a dataset.
    pub fn from_parts(table: &CalendarTable, index: &DateIndex) -> Self {
        Self {
            mappings: index.sorted_pairs(),
            days_per_month: table.days_per_month_by_year().clone(),
            range: index.bs_range().map(|(min, max)| DateRange { min, max }),
        }
    }

    /// Check invariants and split into a table and index.
    ///
    /// # Errors
    /// * [`DataIntegrityError::InvalidMonthLength`] for a length outside
    ///   29..=32.
    /// * [`DataIntegrityError::AmbiguousMapping`] if two BS dates share an
    ///   AD date.
    /// * [`DataIntegrityError::Malformed`] if `range.min > range.max`.
    pub fn into_parts(self) -> Result<(CalendarTable, DateIndex, Option<DateRange>), DataIntegrityError> {
        if let Some(r) = self.range {
            if r.min > r.max {
                return Err(DataIntegrityError::Malformed(format!(
                    "range min {} is after max {}",
                    r.min, r.max
                )));
            }
        }
        let table = CalendarTable::from_entries(self.days_per_month)?;
        let index = DateIndex::build(self.mappings)?;
        Ok((table, index, self.range))
    }
}

/// (De)serializes a list of pairs as a JSON object.
mod mapping_pairs {
    use std::fmt;

    use bs_time::{AdDate, BsDate};
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(pairs: &[(BsDate, AdDate)], s: S) -> Result<S::Ok, S::Error> {
        s.collect_map(pairs.iter().map(|(bs, ad)| (bs, ad)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<(BsDate, AdDate)>, D::Error> {
        struct Pairs;

        impl<'de> Visitor<'de> for Pairs {
            type Value = Vec<(BsDate, AdDate)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of BS date -> AD date")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry()? {
                    out.push(pair);
                }
                Ok(out)
            }
        }

        d.deserialize_map(Pairs)
    }
}
