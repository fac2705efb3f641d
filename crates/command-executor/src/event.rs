//! Output line events and line handlers

use std::fmt;

/// Source of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSource {
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSource::Stdout => f.write_str("stdout"),
            LogSource::Stderr => f.write_str("stderr"),
        }
    }
}

/// A single line of process output, without its trailing newline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEvent {
    /// The stream the line was read from
    pub source: LogSource,
    /// The line text
    pub line: String,
}

impl LineEvent {
    /// Create a new line event
    pub fn new(source: LogSource, line: impl Into<String>) -> Self {
        Self {
            source,
            line: line.into(),
        }
    }
}

/// Receives output lines while a process is running
///
/// Calls are made one at a time, in the order lines arrive. Lines from the
/// same stream keep their relative order; lines from different streams are
/// interleaved by arrival.
pub trait LineHandler: Send {
    /// Handle one line of output
    fn on_line(&mut self, event: LineEvent);
}

impl<F> LineHandler for F
where
    F: FnMut(LineEvent) + Send,
{
    fn on_line(&mut self, event: LineEvent) {
        self(event)
    }
}
