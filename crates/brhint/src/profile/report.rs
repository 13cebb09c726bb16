//! Hint Report Generation
//!
//! Classifies every observed site and serializes the sparse result into a
//! dense digit string indexed by site ID. Gaps, and sites never reached,
//! come out as [`Hint::NoHint`].

use super::counters::{Aggregator, SiteCounters};
use super::hint::{classify, Hint};
use super::site::SiteId;
use crate::result::BrhintResult;
use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::slice;

/// One classified site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteHint {
    /// Site identifier
    pub site: SiteId,
    /// Counters the hint was derived from
    pub counters: SiteCounters,
    /// Classification result
    pub hint: Hint,
}

/// Tally of hints among observed sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HintSummary {
    /// Distinct sites observed
    pub sites: usize,
    /// Sites classified as do-take
    pub do_take: usize,
    /// Sites classified as do-not-take
    pub do_not_take: usize,
    /// Observed sites left without a hint
    pub no_hint: usize,
    /// Length of the encoded string
    pub encoded_len: usize,
    /// Events recorded
    pub total_events: u64,
}

/// JSON document for a report: the hint string, tallies and per-site detail
#[derive(Debug, Clone, Serialize)]
pub struct HintDocument<'a> {
    /// Encoded hint string
    pub hints: String,
    /// Hint tallies
    pub summary: HintSummary,
    /// Per-site counters and hints
    pub sites: &'a [SiteHint],
    /// Trap message if the run ended in a trap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trap: Option<&'a str>,
}

/// Classified view of an aggregator, sorted by site
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HintReport {
    entries: Vec<SiteHint>,
    total_events: u64,
}

impl HintReport {
    /// Classify every site in the table. Reads only.
    #[must_use]
    pub fn from_aggregator(aggregator: &Aggregator) -> Self {
        let mut entries: Vec<SiteHint> = aggregator
            .iter()
            .map(|(&site, &counters)| SiteHint {
                site,
                counters,
                hint: classify(&counters),
            })
            .collect();
        entries.sort_unstable_by_key(|e| e.site);
        Self {
            entries,
            total_events: aggregator.total_events(),
        }
    }

    /// Classified sites in ascending order
    #[must_use]
    pub fn entries(&self) -> &[SiteHint] {
        &self.entries
    }

    /// Hint for one site; unobserved sites have no hint
    #[must_use]
    pub fn hint(&self, site: SiteId) -> Hint {
        self.entries
            .binary_search_by_key(&site, |e| e.site)
            .map_or(Hint::NoHint, |i| self.entries[i].hint)
    }

    /// Number of positions in the dense encoding (`max site + 1`)
    #[must_use]
    pub fn dense_len(&self) -> usize {
        self.entries
            .last()
            .map_or(0, |e| e.site.as_u32() as usize + 1)
    }

    /// Hints for every ID from 0 through the largest observed site
    #[must_use]
    pub fn dense(&self) -> DenseHints<'_> {
        DenseHints {
            entries: self.entries.iter().peekable(),
            next_id: 0,
            end: self.dense_len(),
        }
    }

    /// The hint string: one ASCII digit per site ID, no separators
    #[must_use]
    pub fn encode(&self) -> String {
        self.dense().map(Hint::as_char).collect()
    }

    /// Tally of hints among observed sites
    #[must_use]
    pub fn summary(&self) -> HintSummary {
        let mut summary = HintSummary {
            sites: self.entries.len(),
            encoded_len: self.dense_len(),
            total_events: self.total_events,
            ..HintSummary::default()
        };
        for entry in &self.entries {
            match entry.hint {
                Hint::DoTake => summary.do_take += 1,
                Hint::DoNotTake => summary.do_not_take += 1,
                Hint::NoHint => summary.no_hint += 1,
            }
        }
        summary
    }

    /// Borrowed JSON view of the report
    #[must_use]
    pub fn document<'a>(&'a self, trap: Option<&'a str>) -> HintDocument<'a> {
        HintDocument {
            hints: self.encode(),
            summary: self.summary(),
            sites: &self.entries,
            trap,
        }
    }

    /// Pretty JSON rendering of [`HintReport::document`]
    pub fn to_json(&self, trap: Option<&str>) -> BrhintResult<String> {
        Ok(serde_json::to_string_pretty(&self.document(trap))?)
    }

    /// Events the report was built from
    #[must_use]
    pub const fn total_events(&self) -> u64 {
        self.total_events
    }

    /// True when no site was observed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Gap-filling walk over a report: merges the sorted entries against a
/// running ID counter.
#[derive(Debug, Clone)]
pub struct DenseHints<'a> {
    entries: Peekable<slice::Iter<'a, SiteHint>>,
    next_id: usize,
    end: usize,
}

impl Iterator for DenseHints<'_> {
    type Item = Hint;

    fn next(&mut self) -> Option<Hint> {
        if self.next_id >= self.end {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        match self.entries.peek() {
            Some(entry) if entry.site.as_u32() as usize == id => {
                let hint = entry.hint;
                let _ = self.entries.next();
                Some(hint)
            }
            _ => Some(Hint::NoHint),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next_id;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DenseHints<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{BranchEvent, BranchKind};
    use proptest::prelude::*;

    fn record_n(agg: &mut Aggregator, site: u32, kind: BranchKind, taken: bool, n: usize) {
        for _ in 0..n {
            agg.record(BranchEvent::new(SiteId::new(site), kind, taken));
        }
    }

    #[test]
    fn test_empty_table_encodes_empty() {
        let report = HintReport::from_aggregator(&Aggregator::new());
        assert!(report.is_empty());
        assert_eq!(report.encode(), "");
        assert_eq!(report.dense_len(), 0);
    }

    #[test]
    fn test_single_hot_site() {
        let mut agg = Aggregator::new();
        record_n(&mut agg, 5, BranchKind::If, true, 25);
        let report = HintReport::from_aggregator(&agg);
        assert_eq!(report.encode(), "222221");
        assert_eq!(report.hint(SiteId::new(5)), Hint::DoTake);
        assert_eq!(report.hint(SiteId::new(2)), Hint::NoHint);
    }

    #[test]
    fn test_gaps_are_filled_with_no_hint() {
        let mut agg = Aggregator::new();
        record_n(&mut agg, 0, BranchKind::If, false, 30);
        record_n(&mut agg, 3, BranchKind::If, true, 30);
        let encoded = HintReport::from_aggregator(&agg).encode();
        assert_eq!(encoded.len(), 4);
        assert_eq!(encoded, "0221");
        assert_eq!(&encoded[1..3], "22");
    }

    #[test]
    fn test_mixed_kinds() {
        let mut agg = Aggregator::new();
        // br_if always falls through: raw taken 100%, never branches
        record_n(&mut agg, 0, BranchKind::BrIf, true, 40);
        // br_if always branches
        record_n(&mut agg, 1, BranchKind::BrIf, false, 40);
        // balanced if
        record_n(&mut agg, 2, BranchKind::If, true, 20);
        record_n(&mut agg, 2, BranchKind::If, false, 20);
        // rarely seen
        record_n(&mut agg, 3, BranchKind::If, true, 5);
        let report = HintReport::from_aggregator(&agg);
        assert_eq!(report.encode(), "0122");

        let summary = report.summary();
        assert_eq!(summary.sites, 4);
        assert_eq!(summary.do_take, 1);
        assert_eq!(summary.do_not_take, 1);
        assert_eq!(summary.no_hint, 2);
        assert_eq!(summary.encoded_len, 4);
        assert_eq!(summary.total_events, 125);
    }

    #[test]
    fn test_report_is_pure_read() {
        let mut agg = Aggregator::new();
        record_n(&mut agg, 2, BranchKind::If, true, 21);
        let first = HintReport::from_aggregator(&agg).encode();
        let second = HintReport::from_aggregator(&agg).encode();
        assert_eq!(first, second);
        assert_eq!(agg.total_events(), 21);
    }

    #[test]
    fn test_dense_is_exact_size() {
        let mut agg = Aggregator::new();
        record_n(&mut agg, 9, BranchKind::If, true, 1);
        let report = HintReport::from_aggregator(&agg);
        let dense = report.dense();
        assert_eq!(dense.len(), 10);
        assert!(dense.take(9).all(|h| h == Hint::NoHint));
    }

    #[test]
    fn test_report_serializes() {
        let mut agg = Aggregator::new();
        record_n(&mut agg, 1, BranchKind::BrIf, false, 20);
        let report = HintReport::from_aggregator(&agg);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"][0]["site"], 1);
        assert_eq!(json["entries"][0]["hint"], "do_take");
        assert_eq!(json["entries"][0]["counters"]["kind"], "br_if");
        assert_eq!(json["total_events"], 20);
    }

    #[test]
    fn test_to_json_document() {
        let mut agg = Aggregator::new();
        record_n(&mut agg, 2, BranchKind::If, true, 20);
        let report = HintReport::from_aggregator(&agg);

        let json = report.to_json(None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["hints"], "221");
        assert_eq!(value["summary"]["do_take"], 1);
        assert_eq!(value["summary"]["total_events"], 20);
        assert_eq!(value["sites"][0]["site"], 2);
        assert_eq!(value["sites"][0]["counters"]["times_seen"], 20);
        assert!(value.get("trap").is_none());

        let trapped: serde_json::Value =
            serde_json::from_str(&report.to_json(Some("unreachable")).unwrap()).unwrap();
        assert_eq!(trapped["trap"], "unreachable");
    }

    proptest! {
        #[test]
        fn prop_length_is_max_plus_one(sites in proptest::collection::vec(0u32..2_000, 1..64)) {
            let mut agg = Aggregator::new();
            for &s in &sites {
                agg.record(BranchEvent::new(SiteId::new(s), BranchKind::If, true));
            }
            let max = *sites.iter().max().unwrap() as usize;
            let encoded = HintReport::from_aggregator(&agg).encode();
            prop_assert_eq!(encoded.len(), max + 1);
            prop_assert!(encoded.bytes().all(|b| matches!(b, b'0' | b'1' | b'2')));
        }

        #[test]
        fn prop_dense_position_matches_lookup(sites in proptest::collection::vec((0u32..300, any::<bool>(), 0usize..40), 1..32)) {
            let mut agg = Aggregator::new();
            for &(s, taken, n) in &sites {
                record_n(&mut agg, s, BranchKind::If, taken, n.max(1));
            }
            let report = HintReport::from_aggregator(&agg);
            for (id, hint) in report.dense().enumerate() {
                prop_assert_eq!(hint, report.hint(SiteId::new(id as u32)));
            }
        }
    }
}
