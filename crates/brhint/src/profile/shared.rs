//! Multi-Context Profiling
//!
//! For hosts that run instrumented code on several threads. Each execution
//! context owns a [`StreamIngestor`] with private reconstruction state; the
//! counter table is shared behind a mutex that is only taken when an event
//! completes.

use super::counters::Aggregator;
use super::ingest::{EventIngestor, EventSink};
use super::report::HintReport;
use super::sink::HintSink;
use super::site::BranchEvent;
use crate::result::BrhintResult;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to a counter table shared between contexts
#[derive(Debug, Clone, Default)]
pub struct SharedProfile {
    inner: Arc<Mutex<Aggregator>>,
}

impl SharedProfile {
    /// Create an empty shared table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// New ingestion stream for one execution context
    #[must_use]
    pub fn stream(&self) -> StreamIngestor {
        StreamIngestor {
            ingestor: EventIngestor::new(),
            sink: SharedSink {
                profile: self.clone(),
            },
        }
    }

    // Ingestion never fails, so a panicked holder does not invalidate counts.
    fn lock(&self) -> MutexGuard<'_, Aggregator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Classify the shared table
    #[must_use]
    pub fn snapshot(&self) -> HintReport {
        HintReport::from_aggregator(&self.lock())
    }

    /// Report trigger for the shared table.
    ///
    /// Callers must ensure every stream has finished.
    pub fn report<S: HintSink + ?Sized>(&self, sink: &mut S) -> BrhintResult<HintReport> {
        let report = self.snapshot();
        sink.emit(&report.encode())?;
        Ok(report)
    }

    /// Copy of the current counter table
    #[must_use]
    pub fn aggregator(&self) -> Aggregator {
        self.lock().clone()
    }
}

#[derive(Debug, Clone)]
struct SharedSink {
    profile: SharedProfile,
}

impl EventSink for SharedSink {
    fn record(&mut self, event: BranchEvent) {
        self.profile.lock().record(event);
    }
}

/// Ingestion stream owned by one execution context
#[derive(Debug, Clone)]
pub struct StreamIngestor {
    ingestor: EventIngestor,
    sink: SharedSink,
}

impl StreamIngestor {
    /// Feed one signal from this context
    #[inline]
    pub fn ingest(&mut self, signal: i32) {
        self.ingestor.ingest(signal, &mut self.sink);
    }

    /// This stream's reconstruction state
    #[must_use]
    pub const fn ingestor(&self) -> &EventIngestor {
        &self.ingestor
    }
}
