//! Event Ingestion Engine
//!
//! Rebuilds [`BranchEvent`]s from the one-integer signal stream emitted by
//! instrumented code. Every instrumented `if`/`br_if` produces:
//!
//! ```text
//! site-id, kind, <instruction>, -1 (fall-through path only)
//! ```
//!
//! When control leaves the fall-through path the trailing `-1` is never sent
//! and the next signal seen is the next site's ID. That signal both closes
//! the pending event as not-taken and opens the next one.
//!
//! The engine holds O(1) state and never allocates.

use super::site::{BranchEvent, BranchKind, SiteId, OUTCOME_SENTINEL};
use tracing::trace;

/// Receiver of completed branch events
pub trait EventSink {
    /// Record one completed event
    fn record(&mut self, event: BranchEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: BranchEvent) {
        (**self).record(event);
    }
}

/// Three-phase reconstruction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestState {
    /// Next signal is a site ID
    #[default]
    AwaitingSiteId,
    /// Next signal is the branch kind
    AwaitingKind {
        /// Pending site
        site: SiteId,
    },
    /// Next signal is the sentinel or the next site ID
    AwaitingOutcome {
        /// Pending site
        site: SiteId,
        /// Pending kind
        kind: BranchKind,
    },
}

/// Per-stream ingestion state machine.
///
/// One instance per execution context. Interleaving signals from two
/// contexts into one ingestor corrupts reconstruction.
#[derive(Debug, Clone, Default)]
pub struct EventIngestor {
    state: IngestState,
    signals: u64,
    events: u64,
    dropped: u64,
}

impl EventIngestor {
    /// Create an idle ingestor
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw signal, forwarding any completed event to `sink`.
    pub fn ingest<S: EventSink + ?Sized>(&mut self, signal: i32, sink: &mut S) {
        self.signals += 1;
        match self.state {
            IngestState::AwaitingSiteId => self.open(signal),
            IngestState::AwaitingKind { site } => {
                if signal == OUTCOME_SENTINEL {
                    self.drop_signal(signal);
                } else {
                    self.state = IngestState::AwaitingOutcome {
                        site,
                        kind: BranchKind::from_signal(signal),
                    };
                }
            }
            IngestState::AwaitingOutcome { site, kind } => {
                let taken = signal == OUTCOME_SENTINEL;
                sink.record(BranchEvent::new(site, kind, taken));
                self.events += 1;
                self.state = IngestState::AwaitingSiteId;
                if !taken {
                    self.open(signal);
                }
            }
        }
    }

    fn open(&mut self, signal: i32) {
        match SiteId::from_signal(signal) {
            Some(site) => self.state = IngestState::AwaitingKind { site },
            None => self.drop_signal(signal),
        }
    }

    fn drop_signal(&mut self, signal: i32) {
        self.dropped += 1;
        trace!(signal, state = ?self.state, "dropping out-of-sequence signal");
    }

    /// Current reconstruction state
    #[must_use]
    pub const fn state(&self) -> IngestState {
        self.state
    }

    /// True when no partial event is pending
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, IngestState::AwaitingSiteId)
    }

    /// Site of the partial event, if one is pending
    #[must_use]
    pub const fn pending(&self) -> Option<SiteId> {
        match self.state {
            IngestState::AwaitingSiteId => None,
            IngestState::AwaitingKind { site } | IngestState::AwaitingOutcome { site, .. } => {
                Some(site)
            }
        }
    }

    /// Total signals received
    #[must_use]
    pub const fn signal_count(&self) -> u64 {
        self.signals
    }

    /// Total events forwarded
    #[must_use]
    pub const fn event_count(&self) -> u64 {
        self.events
    }

    /// Signals discarded because they could not start or continue an event
    #[must_use]
    pub const fn dropped_count(&self) -> u64 {
        self.dropped
    }

    /// Discard any partial event
    pub fn reset(&mut self) {
        self.state = IngestState::AwaitingSiteId;
    }
}
