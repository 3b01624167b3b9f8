//! `ReferenceAnchor` — the zero-offset point for day-count conversion.

use bs_time::{AdDate, BsDate};

/// A verified BS/AD date pair at which the day-count fallback has offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceAnchor {
    bs: BsDate,
    ad: AdDate,
}

/// 1 Baisakh 2081 = 13 April 2024.
pub const REFERENCE_ANCHOR: ReferenceAnchor = ReferenceAnchor {
    bs: BsDate::from_ymd_const(2081, 1, 1),
    ad: AdDate::from_ymd_const(2024, 4, 13),
};

impl ReferenceAnchor {
    /// Pair an arbitrary BS date with its AD equivalent.
    pub fn new(bs: BsDate, ad: AdDate) -> Self {
        Self { bs, ad }
    }

    /// The BS side.
    pub fn bs(&self) -> BsDate {
        self.bs
    }

    /// The AD side.
    pub fn ad(&self) -> AdDate {
        self.ad
    }
}

impl Default for ReferenceAnchor {
    fn default() -> Self {
        REFERENCE_ANCHOR
    }
}
