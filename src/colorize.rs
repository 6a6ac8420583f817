use std::io::{self, Write};
use std::sync::Arc;

use crate::level::LogLine;
use crate::terminal::{TerminalWriter, Tint};

/// Which child stream a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// Picks the tint of each child line and hands it to the terminal.
pub struct Colorizer<W: Write> {
    terminal: Arc<TerminalWriter<W>>,
}

impl<W: Write> Clone for Colorizer<W> {
    fn clone(&self) -> Self {
        Self { terminal: Arc::clone(&self.terminal) }
    }
}

impl<W: Write> Colorizer<W> {
    pub fn new(terminal: Arc<TerminalWriter<W>>) -> Self {
        Self { terminal }
    }

    pub fn terminal(&self) -> &TerminalWriter<W> {
        &self.terminal
    }

    pub fn on_line(&self, kind: StreamKind, line: &str) -> io::Result<()> {
        match kind {
            StreamKind::Stdout => self.on_stdout(line),
            StreamKind::Stderr => self.on_stderr(line),
        }
    }

    /// Structured lines are tinted by level, anything else passes through as-is.
    pub fn on_stdout(&self, line: &str) -> io::Result<()> {
        self.terminal.write_line(line, tint_for(line))
    }

    /// Error stream output is always red, whatever it contains.
    pub fn on_stderr(&self, line: &str) -> io::Result<()> {
        self.terminal.write_line(line, Tint::Error)
    }
}

pub fn tint_for(line: &str) -> Tint {
    LogLine::parse(line).level().map_or(Tint::Default, Tint::from)
}
