//! Hint Classification
//!
//! Turns one site's counters into a ternary layout hint.

use super::counters::SiteCounters;
use serde::{Deserialize, Serialize};

/// Sites observed fewer times than this never get a hint.
pub const MIN_SAMPLES: u64 = 20;

/// A taken ratio strictly above this (as tenths) yields [`Hint::DoTake`].
pub const TAKE_RATIO_TENTHS: u64 = 9;

/// A taken ratio strictly below this (as tenths) yields [`Hint::DoNotTake`].
pub const NOT_TAKE_RATIO_TENTHS: u64 = 1;

/// Layout hint for one branch site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    /// Branch is almost never taken
    DoNotTake,
    /// Branch is almost always taken
    DoTake,
    /// Not enough samples, or no clear bias
    #[default]
    NoHint,
}

impl Hint {
    /// Wire digit for this hint
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::DoNotTake => '0',
            Self::DoTake => '1',
            Self::NoHint => '2',
        }
    }

    /// Parse a wire digit
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::DoNotTake),
            '1' => Some(Self::DoTake),
            '2' => Some(Self::NoHint),
            _ => None,
        }
    }

    /// Classify a taken/seen pair whose polarity is already corrected.
    ///
    /// Ratios are compared in integers: `taken / seen > 0.9` is
    /// `taken * 10 > seen * 9`.
    #[must_use]
    pub fn from_ratio(taken: u64, seen: u64) -> Self {
        if seen < MIN_SAMPLES {
            return Self::NoHint;
        }
        let taken = u128::from(taken) * 10;
        let seen = u128::from(seen);
        if taken > seen * u128::from(TAKE_RATIO_TENTHS) {
            Self::DoTake
        } else if taken < seen * u128::from(NOT_TAKE_RATIO_TENTHS) {
            Self::DoNotTake
        } else {
            Self::NoHint
        }
    }
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Classify one site's counters, correcting `br_if` polarity first.
#[must_use]
pub fn classify(counters: &SiteCounters) -> Hint {
    Hint::from_ratio(counters.times_taken(), counters.times_seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::BranchKind;
    use proptest::prelude::*;

    fn counters(kind: BranchKind, seen: u64, raw: u64) -> SiteCounters {
        SiteCounters {
            times_seen: seen,
            times_taken_raw: raw,
            kind,
        }
    }

    #[test]
    fn test_thresholds_are_pinned() {
        assert_eq!(MIN_SAMPLES, 20);
        assert_eq!(TAKE_RATIO_TENTHS, 9);
        assert_eq!(NOT_TAKE_RATIO_TENTHS, 1);
    }

    #[test]
    fn test_wire_digits() {
        assert_eq!(Hint::DoNotTake.as_char(), '0');
        assert_eq!(Hint::DoTake.as_char(), '1');
        assert_eq!(Hint::NoHint.as_char(), '2');
        assert_eq!(Hint::from_char('1'), Some(Hint::DoTake));
        assert_eq!(Hint::from_char('3'), None);
        assert_eq!(Hint::DoTake.to_string(), "1");
    }

    #[test]
    fn test_below_sample_floor_is_no_hint() {
        assert_eq!(classify(&counters(BranchKind::If, 19, 19)), Hint::NoHint);
        assert_eq!(classify(&counters(BranchKind::If, 19, 0)), Hint::NoHint);
        assert_eq!(classify(&counters(BranchKind::If, 0, 0)), Hint::NoHint);
    }

    #[test]
    fn test_sample_floor_is_inclusive() {
        assert_eq!(classify(&counters(BranchKind::If, 20, 20)), Hint::DoTake);
        assert_eq!(classify(&counters(BranchKind::If, 20, 0)), Hint::DoNotTake);
    }

    #[test]
    fn test_ratio_boundaries_are_strict() {
        // exactly 0.9 and exactly 0.1 give no hint
        assert_eq!(classify(&counters(BranchKind::If, 100, 90)), Hint::NoHint);
        assert_eq!(classify(&counters(BranchKind::If, 100, 91)), Hint::DoTake);
        assert_eq!(classify(&counters(BranchKind::If, 100, 10)), Hint::NoHint);
        assert_eq!(classify(&counters(BranchKind::If, 100, 9)), Hint::DoNotTake);
        assert_eq!(classify(&counters(BranchKind::If, 100, 50)), Hint::NoHint);
    }

    #[test]
    fn test_br_if_polarity_is_reversed() {
        assert_eq!(
            classify(&counters(BranchKind::BrIf, 100, 95)),
            Hint::DoNotTake
        );
        assert_eq!(classify(&counters(BranchKind::BrIf, 100, 5)), Hint::DoTake);
        assert_eq!(classify(&counters(BranchKind::If, 100, 95)), Hint::DoTake);
    }

    #[test]
    fn test_large_counts_do_not_overflow() {
        assert_eq!(Hint::from_ratio(u64::MAX, u64::MAX), Hint::DoTake);
        assert_eq!(Hint::from_ratio(0, u64::MAX), Hint::DoNotTake);
    }

    proptest! {
        #[test]
        fn prop_few_samples_never_hint(seen in 0u64..20, frac in 0.0f64..=1.0) {
            let raw = (seen as f64 * frac) as u64;
            prop_assert_eq!(classify(&counters(BranchKind::If, seen, raw)), Hint::NoHint);
            prop_assert_eq!(classify(&counters(BranchKind::BrIf, seen, raw)), Hint::NoHint);
        }

        #[test]
        fn prop_integer_compare_matches_ratio(seen in 20u64..100_000, raw_frac in 0.0f64..=1.0) {
            let taken = ((seen as f64) * raw_frac) as u64;
            let ratio = taken as f64 / seen as f64;
            let expected = if ratio > 0.9 {
                Hint::DoTake
            } else if ratio < 0.1 {
                Hint::DoNotTake
            } else {
                Hint::NoHint
            };
            prop_assert_eq!(Hint::from_ratio(taken, seen), expected);
        }

        #[test]
        fn prop_polarity_mirrors(seen in 20u64..10_000, raw_frac in 0.0f64..=1.0) {
            let raw = ((seen as f64) * raw_frac) as u64;
            let direct = classify(&counters(BranchKind::If, seen, seen - raw));
            let reversed = classify(&counters(BranchKind::BrIf, seen, raw));
            prop_assert_eq!(direct, reversed);
        }
    }
}
