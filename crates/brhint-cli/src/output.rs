//! Report output: the hint string (text or JSON) and the stderr summary

use crate::commands::{FormatArg, OutputArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use brhint::{BranchKind, HintReport, MemorySink, ProfilingSession, TracingSink, WriterSink};
use console::{style, Term};
use std::io::Write;
use std::path::Path;

/// Render a report as pretty JSON
pub fn render_json(report: &HintReport, trap: Option<&str>) -> CliResult<String> {
    report
        .to_json(trap)
        .map_err(|e| CliError::report_generation(e.to_string()))
}

/// Trigger the session's report into the destination chosen by `args`
pub fn emit_report(
    session: &mut ProfilingSession,
    args: &OutputArgs,
    trap: Option<&str>,
) -> CliResult<HintReport> {
    if args.log_hints {
        return Ok(session.report(&mut TracingSink)?);
    }
    match args.format {
        FormatArg::Text => match &args.output {
            Some(path) => {
                let mut sink = WriterSink::create(path)?;
                Ok(session.report(&mut sink)?)
            }
            None => {
                let mut sink = WriterSink::stdout();
                Ok(session.report(&mut sink)?)
            }
        },
        FormatArg::Json => {
            let mut sink = MemorySink::new();
            let report = session.report(&mut sink)?;
            let json = render_json(&report, trap)?;
            match &args.output {
                Some(path) => std::fs::write(path, format!("{json}\n"))?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{json}")?;
                    stdout.flush()?;
                }
            }
            Ok(report)
        }
    }
}

/// Human summary on stderr, unless quiet
pub fn print_summary(config: &CliConfig, report: &HintReport, destination: Option<&Path>) {
    if config.verbosity.is_quiet() {
        return;
    }
    let summary = report.summary();
    let term = Term::stderr();
    let _ = term.write_line(&format!(
        "{} {} sites, {} events",
        style("profiled").green().bold(),
        summary.sites,
        summary.total_events
    ));
    let _ = term.write_line(&format!(
        "  do-take {}  do-not-take {}  no-hint {}  hint length {}",
        style(summary.do_take).cyan(),
        style(summary.do_not_take).cyan(),
        style(summary.no_hint).dim(),
        summary.encoded_len
    ));
    if config.verbosity.is_verbose() {
        for entry in report.entries() {
            let counters = entry.counters;
            let _ = term.write_line(&format!(
                "  site {:>5} {:<5} seen {:>8} taken {:>8} -> {}",
                entry.site.as_u32(),
                kind_label(counters.kind),
                counters.times_seen,
                counters.times_taken(),
                entry.hint
            ));
        }
    }
    if let Some(path) = destination {
        let _ = term.write_line(&format!("  hints written to {}", path.display()));
    }
}

const fn kind_label(kind: BranchKind) -> &'static str {
    match kind {
        BranchKind::BrIf => "br_if",
        BranchKind::If => "if",
    }
}

/// Warning line on stderr, unless quiet
pub fn print_warning(config: &CliConfig, message: &str) {
    if config.verbosity.is_quiet() {
        return;
    }
    let _ = Term::stderr().write_line(&format!("{} {message}", style("warning:").yellow().bold()));
}
