//! Per-Site Counter Aggregation
//!
//! Owns one [`SiteCounters`] record per observed site. Records are created on
//! first observation and never deleted.

use super::ingest::EventSink;
use super::site::{BranchEvent, BranchKind, SiteId};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Observation counters for one branch site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCounters {
    /// Total observations
    pub times_seen: u64,
    /// Observations whose raw signal said "taken"
    pub times_taken_raw: u64,
    /// Kind fixed by the first observation
    pub kind: BranchKind,
}

impl SiteCounters {
    /// Empty counters for a site of the given kind
    #[must_use]
    pub const fn new(kind: BranchKind) -> Self {
        Self {
            times_seen: 0,
            times_taken_raw: 0,
            kind,
        }
    }

    /// Count one observation
    #[inline]
    pub fn observe(&mut self, taken: bool) {
        self.times_seen += 1;
        if taken {
            self.times_taken_raw += 1;
        }
    }

    /// Whether the site is a conditional (`if`) branch
    #[must_use]
    pub const fn is_conditional(&self) -> bool {
        self.kind.is_conditional()
    }

    /// Times the branch was actually taken, with polarity corrected
    #[must_use]
    pub const fn times_taken(&self) -> u64 {
        self.kind.normalize_taken(self.times_taken_raw, self.times_seen)
    }
}

/// Table of site counters keyed by site ID.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    sites: BTreeMap<SiteId, SiteCounters>,
    total_events: u64,
}

impl Aggregator {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one branch event.
    ///
    /// The site's kind is taken from its first event; later events do not
    /// change it.
    pub fn record(&mut self, event: BranchEvent) {
        self.sites
            .entry(event.site)
            .or_insert_with(|| SiteCounters::new(event.kind))
            .observe(event.taken);
        self.total_events += 1;
    }

    /// Counters for a site, if it was ever observed
    #[must_use]
    pub fn get(&self, site: SiteId) -> Option<&SiteCounters> {
        self.sites.get(&site)
    }

    /// Sites in ascending ID order
    pub fn iter(&self) -> btree_map::Iter<'_, SiteId, SiteCounters> {
        self.sites.iter()
    }

    /// Number of distinct sites observed
    #[must_use]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Largest observed site ID
    #[must_use]
    pub fn max_site(&self) -> Option<SiteId> {
        self.sites.keys().next_back().copied()
    }

    /// Total events recorded across all sites
    #[must_use]
    pub const fn total_events(&self) -> u64 {
        self.total_events
    }

    /// True when nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl EventSink for Aggregator {
    fn record(&mut self, event: BranchEvent) {
        Aggregator::record(self, event);
    }
}

impl<'a> IntoIterator for &'a Aggregator {
    type Item = (&'a SiteId, &'a SiteCounters);
    type IntoIter = btree_map::Iter<'a, SiteId, SiteCounters>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
