use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use parking_lot::Mutex;

use crate::level::Level;

/// Display color of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Whatever the terminal currently uses.
    Default,
    Warning,
    Error,
    Marker,
}

impl Tint {
    pub fn color(self) -> Option<Color> {
        match self {
            Tint::Default => None,
            // orange
            Tint::Warning => Some(Color::DarkYellow),
            Tint::Error => Some(Color::Red),
            Tint::Marker => Some(Color::Blue),
        }
    }
}

impl From<Level> for Tint {
    fn from(level: Level) -> Self {
        match level {
            Level::Verbose | Level::Debug | Level::Info => Tint::Default,
            Level::Warn => Tint::Warning,
            Level::Error | Level::Fatal => Tint::Error,
            Level::Silent => Tint::Marker,
        }
    }
}

/// Owner of the terminal and its current foreground color.
///
/// Every write takes the lock for a single line, so lines coming from
/// different streams never split a color sequence.
pub struct TerminalWriter<W: Write> {
    out: Mutex<W>,
}

impl TerminalWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    /// Write one line in `tint`, then go back to the default foreground.
    /// Empty lines produce no output.
    pub fn write_line(&self, line: &str, tint: Tint) -> io::Result<()> {
        if line.is_empty() {
            return Ok(());
        }
        let mut out = self.out.lock();
        match tint.color() {
            Some(color) => {
                queue!(out, SetForegroundColor(color))?;
                out.write_all(line.as_bytes())?;
                queue!(out, SetForegroundColor(Color::Reset))?;
                out.write_all(b"\n")?;
            }
            None => writeln!(out, "{line}")?,
        }
        out.flush()
    }

    /// Uncolored message from colorcat itself.
    pub fn notice(&self, message: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "{message}")?;
        out.flush()
    }

    /// Restore the terminal's colors before handing it back.
    pub fn reset(&self) -> io::Result<()> {
        let mut out = self.out.lock();
        queue!(out, ResetColor)?;
        out.flush()
    }
}
