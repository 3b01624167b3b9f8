//! `DateIndex` — exact BS ⇄ AD date mapping.
//!
//! The forward map is built eagerly; the reverse map is materialized on the
//! first reverse lookup and cached for the lifetime of the index.  Because
//! [`DateIndex::build`] rejects any dataset in which a date on either side
//! has two counterparts, the reverse map is always the exact inverse of the
//! forward one.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use bs_core::errors::DataIntegrityError;
use bs_time::{AdDate, BsDate};

/// Bidirectional exact-date index.
#[derive(Debug, Clone, Default)]
pub struct DateIndex {
    bs_to_ad: HashMap<BsDate, AdDate>,
    ad_to_bs: OnceLock<HashMap<AdDate, BsDate>>,
}

impl DateIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(bs, ad)` pairs.
    ///
    /// Repeating an identical pair is harmless; the later occurrence wins.
    ///
    /// # Errors
    /// [`DataIntegrityError::AmbiguousMapping`] if one BS date is paired with
    /// two different AD dates, or one AD date with two different BS dates.
    pub fn build<I>(pairs: I) -> Result<Self, DataIntegrityError>
    where
        I: IntoIterator<Item = (BsDate, AdDate)>,
    {
        let mut bs_to_ad: HashMap<BsDate, AdDate> = HashMap::new();
        let mut claimed: HashSet<AdDate> = HashSet::new();
        for (bs, ad) in pairs {
            match bs_to_ad.insert(bs, ad) {
                Some(previous) if previous != ad => {
                    return Err(DataIntegrityError::AmbiguousMapping {
                        key: bs.to_string(),
                        first: previous.to_string(),
                        second: ad.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    if !claimed.insert(ad) {
                        let first = bs_to_ad
                            .iter()
                            .find(|&(other, &v)| v == ad && *other != bs)
                            .map(|(other, _)| other.to_string())
                            .unwrap_or_default();
                        return Err(DataIntegrityError::AmbiguousMapping {
                            key: ad.to_string(),
                            first,
                            second: bs.to_string(),
                        });
                    }
                }
            }
        }
        Ok(Self {
            bs_to_ad,
            ad_to_bs: OnceLock::new(),
        })
    }

    /// Exact AD date for `bs`, if indexed.
    pub fn lookup_bs_to_ad(&self, bs: &BsDate) -> Option<AdDate> {
        self.bs_to_ad.get(bs).copied()
    }

    /// Exact BS date for `ad`, if indexed.
    pub fn lookup_ad_to_bs(&self, ad: &AdDate) -> Option<BsDate> {
        self.reverse().get(ad).copied()
    }

    fn reverse(&self) -> &HashMap<AdDate, BsDate> {
        self.ad_to_bs
            .get_or_init(|| self.bs_to_ad.iter().map(|(&bs, &ad)| (ad, bs)).collect())
    }

    /// Return `true` once the reverse map has been materialized.
    pub fn is_reverse_built(&self) -> bool {
        self.ad_to_bs.get().is_some()
    }

    /// Number of indexed pairs.
    pub fn len(&self) -> usize {
        self.bs_to_ad.len()
    }

    /// Return `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.bs_to_ad.is_empty()
    }

    /// Indexed BS dates, in no particular order.
    pub fn bs_dates(&self) -> impl Iterator<Item = &BsDate> + '_ {
        self.bs_to_ad.keys()
    }

    /// All pairs ordered by BS date.
    pub fn sorted_pairs(&self) -> Vec<(BsDate, AdDate)> {
        let mut pairs: Vec<_> = self.bs_to_ad.iter().map(|(&b, &a)| (b, a)).collect();
        pairs.sort_unstable();
        pairs
    }

    /// Earliest and latest indexed BS dates.
    pub fn bs_range(&self) -> Option<(BsDate, BsDate)> {
        let min = self.bs_to_ad.keys().min()?;
        let max = self.bs_to_ad.keys().max()?;
        Some((*min, *max))
    }
}
