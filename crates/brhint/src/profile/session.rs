//! Profiling Session
//!
//! The context object a host owns for one signal stream: one ingestor, one
//! counter table, and the report trigger.

use super::counters::Aggregator;
use super::ingest::EventIngestor;
use super::report::HintReport;
use super::sink::HintSink;
use crate::result::BrhintResult;
use tracing::{debug, info};

/// Single-stream profiling context
#[derive(Debug, Clone, Default)]
pub struct ProfilingSession {
    ingestor: EventIngestor,
    aggregator: Aggregator,
    reports: usize,
}

impl ProfilingSession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingestion entry point: feed one signal from instrumented code
    #[inline]
    pub fn ingest(&mut self, signal: i32) {
        self.ingestor.ingest(signal, &mut self.aggregator);
    }

    /// Feed a batch of signals in order
    pub fn ingest_all<I: IntoIterator<Item = i32>>(&mut self, signals: I) {
        for signal in signals {
            self.ingest(signal);
        }
    }

    /// Classify the current table without emitting anything
    #[must_use]
    pub fn snapshot(&self) -> HintReport {
        HintReport::from_aggregator(&self.aggregator)
    }

    /// Report trigger: classify, encode and deliver the hint string.
    ///
    /// A pending partial event is left out. Calling this again on an
    /// unchanged session emits the same string.
    pub fn report<S: HintSink + ?Sized>(&mut self, sink: &mut S) -> BrhintResult<HintReport> {
        if let Some(site) = self.ingestor.pending() {
            debug!(%site, "discarding incomplete event at report time");
        }
        if self.reports > 0 {
            debug!(reports = self.reports, "session reported more than once");
        }
        let report = self.snapshot();
        let encoded = report.encode();
        let summary = report.summary();
        info!(
            sites = summary.sites,
            do_take = summary.do_take,
            do_not_take = summary.do_not_take,
            no_hint = summary.no_hint,
            events = summary.total_events,
            dropped_signals = self.ingestor.dropped_count(),
            "branch profile complete"
        );
        sink.emit(&encoded)?;
        self.reports += 1;
        Ok(report)
    }

    /// Counter table
    #[must_use]
    pub const fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Ingestion state machine
    #[must_use]
    pub const fn ingestor(&self) -> &EventIngestor {
        &self.ingestor
    }

    /// Number of completed reports
    #[must_use]
    pub const fn report_count(&self) -> usize {
        self.reports
    }
}
