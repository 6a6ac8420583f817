//! colorcat: runs adb and colors its output by log level.

pub mod app;
pub mod cli;
pub mod colorize;
pub mod error;
pub mod launcher;
pub mod level;
pub mod source;
pub mod terminal;
