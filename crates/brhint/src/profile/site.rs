//! Type-Safe Branch Site Identifiers
//!
//! Site IDs and branch kinds are distinct types so a raw signal can never be
//! recorded in the wrong slot.

use serde::{Deserialize, Serialize};

/// Sentinel signal emitted on the fall-through path of an instrumented branch.
pub const OUTCOME_SENTINEL: i32 = -1;

/// Kind signal emitted before a `br_if`.
pub const KIND_BR_IF: i32 = 0;

/// Kind signal emitted before an `if`.
pub const KIND_IF: i32 = 1;

/// Branch site identifier, assigned at instrumentation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(u32);

impl SiteId {
    /// Create a new site ID
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Interpret a raw signal as a site ID.
    ///
    /// Returns `None` for negative signals, which are never valid sites.
    #[inline]
    #[must_use]
    pub fn from_signal(signal: i32) -> Option<Self> {
        u32::try_from(signal).ok().map(Self)
    }

    /// Get the inner value
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of an instrumented branch instruction.
///
/// The two categories report their raw "taken" signal with opposite meaning:
/// for an `if` the sentinel marks entry into the then-arm, for a `br_if` it
/// marks the branch falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
    /// `br_if`: reversed polarity
    BrIf,
    /// `if`: direct polarity
    If,
}

impl BranchKind {
    /// Decode the kind slot of an event. Any non-zero value is an `if`.
    #[inline]
    #[must_use]
    pub const fn from_signal(signal: i32) -> Self {
        if signal == KIND_BR_IF {
            Self::BrIf
        } else {
            Self::If
        }
    }

    /// The signal the instrumentation emits for this kind
    #[inline]
    #[must_use]
    pub const fn as_signal(self) -> i32 {
        match self {
            Self::BrIf => KIND_BR_IF,
            Self::If => KIND_IF,
        }
    }

    /// Whether this is the conditional (`if`) category
    #[inline]
    #[must_use]
    pub const fn is_conditional(self) -> bool {
        matches!(self, Self::If)
    }

    /// Turn a raw taken count into a count of branches actually taken.
    ///
    /// Only two kinds exist; a new instrumentation kind must decide its
    /// polarity here.
    #[inline]
    #[must_use]
    pub const fn normalize_taken(self, raw_taken: u64, seen: u64) -> u64 {
        match self {
            Self::If => raw_taken,
            Self::BrIf => seen.saturating_sub(raw_taken),
        }
    }
}

/// One reconstructed branch outcome. Transient, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchEvent {
    /// Site that was executed
    pub site: SiteId,
    /// Category of the branch at that site
    pub kind: BranchKind,
    /// Raw taken signal (the sentinel was observed)
    pub taken: bool,
}

impl BranchEvent {
    /// Create a new event
    #[inline]
    #[must_use]
    pub const fn new(site: SiteId, kind: BranchKind, taken: bool) -> Self {
        Self { site, kind, taken }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_id_from_signal() {
        assert_eq!(SiteId::from_signal(0), Some(SiteId::new(0)));
        assert_eq!(SiteId::from_signal(42), Some(SiteId::new(42)));
        assert_eq!(SiteId::from_signal(OUTCOME_SENTINEL), None);
        assert_eq!(SiteId::from_signal(i32::MIN), None);
        assert_eq!(
            SiteId::from_signal(i32::MAX).map(SiteId::as_u32),
            Some(i32::MAX as u32)
        );
    }

    #[test]
    fn test_site_id_ordering() {
        assert!(SiteId::new(1) < SiteId::new(2));
        assert_eq!(SiteId::new(7).to_string(), "7");
    }

    #[test]
    fn test_branch_kind_from_signal() {
        assert_eq!(BranchKind::from_signal(0), BranchKind::BrIf);
        assert_eq!(BranchKind::from_signal(1), BranchKind::If);
        assert_eq!(BranchKind::from_signal(17), BranchKind::If);
        assert_eq!(BranchKind::from_signal(-5), BranchKind::If);
    }

    #[test]
    fn test_branch_kind_signal_roundtrip() {
        for kind in [BranchKind::BrIf, BranchKind::If] {
            assert_eq!(BranchKind::from_signal(kind.as_signal()), kind);
        }
    }

    #[test]
    fn test_normalize_taken_polarity() {
        assert_eq!(BranchKind::If.normalize_taken(95, 100), 95);
        assert_eq!(BranchKind::BrIf.normalize_taken(95, 100), 5);
        assert_eq!(BranchKind::BrIf.normalize_taken(0, 0), 0);
    }

    #[test]
    fn test_is_conditional() {
        assert!(BranchKind::If.is_conditional());
        assert!(!BranchKind::BrIf.is_conditional());
    }
}
