//! Signal Trace Parsing
//!
//! A recorded signal stream as text: signed 32-bit integers separated by
//! whitespace or commas. `#` starts a comment that runs to end of line.

use crate::result::{BrhintError, BrhintResult};

/// Parse a textual signal trace
pub fn parse_signals(text: &str) -> BrhintResult<Vec<i32>> {
    let mut signals = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.split_once('#').map_or(line, |(code, _)| code);
        for token in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let signal = token.parse::<i32>().map_err(|e| BrhintError::Trace {
                line: line_no + 1,
                message: format!("invalid signal {token:?}: {e}"),
            })?;
            signals.push(signal);
        }
    }
    Ok(signals)
}

/// Render signals back to trace text, one event group per line.
///
/// A line break follows every sentinel so fall-through events read as
/// `site kind -1`.
#[must_use]
pub fn format_signals(signals: &[i32]) -> String {
    let mut out = String::new();
    for (i, signal) in signals.iter().enumerate() {
        if i > 0 && !out.ends_with('\n') {
            out.push(' ');
        }
        out.push_str(&signal.to_string());
        if *signal == super::site::OUTCOME_SENTINEL {
            out.push('\n');
        }
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
