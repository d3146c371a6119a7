//! Per-run log stream.
//!
//! One scrape run produces an ordered sequence of log lines, each tagged as
//! normal or error. A host UI (or the CLI) replays them after the run; the
//! same events are also emitted through `tracing` as they happen.

use std::fmt;

/// A single line in the run log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Human-readable message, without severity prefix.
    pub message: String,

    /// True for lines reporting a failure.
    pub is_error: bool,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error {
            write!(f, "ERROR: {}", self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

/// Ordered collector of log lines for one extraction run.
///
/// Lines are append-only; the collector never outlives its run.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    lines: Vec<LogLine>,
}

impl RunLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a normal progress line.
    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{message}");
        self.lines.push(LogLine { message, is_error: false });
    }

    /// Record an error line. The run itself may still continue.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("{message}");
        self.lines.push(LogLine { message, is_error: true });
    }

    #[must_use]
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
