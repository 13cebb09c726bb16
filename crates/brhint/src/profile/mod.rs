//! Branch Profile Collection
//!
//! Collects per-site branch outcomes from an instrumented module and reduces
//! them to a dense hint string for the next compilation pass.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  BRANCH PROFILE PIPELINE                                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  signals → EventIngestor → Aggregator → HintReport → HintSink    │
//! │              (3-phase)      (per site)   (classify,   (stdout,   │
//! │                                           gap-fill)    file, log)│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Output digits: `0` do-not-take, `1` do-take, `2` no hint.

mod counters;
mod hint;
mod ingest;
mod report;
mod session;
mod shared;
mod sink;
mod site;
mod trace;

pub use counters::{Aggregator, SiteCounters};
pub use hint::{classify, Hint, MIN_SAMPLES, NOT_TAKE_RATIO_TENTHS, TAKE_RATIO_TENTHS};
pub use ingest::{EventIngestor, EventSink, IngestState};
pub use report::{DenseHints, HintDocument, HintReport, HintSummary, SiteHint};
pub use session::ProfilingSession;
pub use shared::{SharedProfile, StreamIngestor};
pub use sink::{HintSink, MemorySink, TracingSink, WriterSink, HINTS_LOG_TARGET};
pub use site::{BranchEvent, BranchKind, SiteId, KIND_BR_IF, KIND_IF, OUTCOME_SENTINEL};
pub use trace::{format_signals, parse_signals};
