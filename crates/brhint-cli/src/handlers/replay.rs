//! Replay command handler

use crate::commands::ReplayArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{emit_report, print_summary};
use brhint::{parse_signals, ProfilingSession};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Read a trace from a file, or from stdin when the path is `-`
pub fn read_trace(path: &Path) -> CliResult<String> {
    let display = path.display().to_string();
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| CliError::input("<stdin>", e.to_string()))?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|e| CliError::input(display, e.to_string()))
}

/// Feed a textual trace through a fresh session
pub fn replay_signals(text: &str) -> CliResult<ProfilingSession> {
    let signals = parse_signals(text)?;
    let mut session = ProfilingSession::new();
    session.ingest_all(signals);
    info!(
        signals = session.ingestor().signal_count(),
        dropped = session.ingestor().dropped_count(),
        "trace replayed"
    );
    Ok(session)
}

/// Execute the replay command
pub fn execute_replay(config: &CliConfig, args: &ReplayArgs) -> CliResult<()> {
    let text = read_trace(&args.trace)?;
    let mut session = replay_signals(&text)?;
    let report = emit_report(&mut session, &args.output, None)?;
    print_summary(config, &report, args.output.output.as_deref());
    Ok(())
}
