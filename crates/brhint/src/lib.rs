//! brhint: Branch Hint Profiling for Instrumented WASM Modules
//!
//! Collects taken/not-taken counts for every instrumented branch site during
//! one run of a module and emits a dense hint string a compiler can use on
//! its next pass to bias block layout and static branch prediction.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    BRHINT Architecture                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Instrumented│   │ Profiling  │    │ Hint       │            │
//! │   │ WASM module │──►│ Session    │───►│ Report     │──► sink    │
//! │   │ (wasmtime) │    │ (signals)  │    │ (0/1/2)    │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use brhint::{MemorySink, ProfilingSession};
//!
//! let mut session = ProfilingSession::new();
//! for _ in 0..25 {
//!     // site 5, an `if`, entered
//!     session.ingest_all([5, 1, -1]);
//! }
//! let mut sink = MemorySink::new();
//! session.report(&mut sink)?;
//! assert_eq!(sink.last(), Some("222221"));
//! # Ok::<(), brhint::BrhintError>(())
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Host configuration
pub mod config;

/// Branch profile collection, classification and encoding
pub mod profile;

mod result;

/// WASM host for instrumented modules
#[cfg(feature = "runtime")]
pub mod runtime;

pub use config::{HostConfig, DEFAULT_ENTRY, DEFAULT_IMPORT_NAME, FALLBACK_IMPORT_MODULE};
pub use profile::{
    classify, format_signals, parse_signals, Aggregator, BranchEvent, BranchKind, EventIngestor,
    EventSink, Hint, HintDocument, HintReport, HintSink, HintSummary, MemorySink, ProfilingSession,
    SharedProfile, SiteCounters, SiteHint, SiteId, StreamIngestor, TracingSink, WriterSink,
    HINTS_LOG_TARGET,
};
pub use result::{BrhintError, BrhintResult};
#[cfg(feature = "runtime")]
pub use runtime::{ProfiledRun, ProfilingHost};
