//! Output Sinks for the Hint String

use crate::result::BrhintResult;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Destination of the encoded hint string
pub trait HintSink {
    /// Deliver the hint string. Called once per report.
    fn emit(&mut self, hints: &str) -> BrhintResult<()>;
}

/// Writes the hint string as one `\n`-terminated line
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    /// Sink writing to standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<File> {
    /// Sink writing to a newly created (or truncated) file
    pub fn create(path: impl AsRef<Path>) -> BrhintResult<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> HintSink for WriterSink<W> {
    fn emit(&mut self, hints: &str) -> BrhintResult<()> {
        writeln!(self.writer, "{hints}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Log target of the events written by [`TracingSink`]
pub const HINTS_LOG_TARGET: &str = "brhint::hints";

/// Emits the hint string as a structured log event on [`HINTS_LOG_TARGET`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl HintSink for TracingSink {
    fn emit(&mut self, hints: &str) -> BrhintResult<()> {
        info!(target: HINTS_LOG_TARGET, len = hints.len(), hints, "branch hints");
        Ok(())
    }
}

/// Keeps every emitted string in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All strings emitted so far
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Most recently emitted string
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl HintSink for MemorySink {
    fn emit(&mut self, hints: &str) -> BrhintResult<()> {
        self.lines.push(hints.to_string());
        Ok(())
    }
}

impl<S: HintSink + ?Sized> HintSink for &mut S {
    fn emit(&mut self, hints: &str) -> BrhintResult<()> {
        (**self).emit(hints)
    }
}

impl<S: HintSink + ?Sized> HintSink for Box<S> {
    fn emit(&mut self, hints: &str) -> BrhintResult<()> {
        (**self).emit(hints)
    }
}
