//! Diagnostics written to the dispatcher's output sink
//!
//! The framework never assumes a terminal, so every message goes to the
//! sink it was handed. Failing to write a diagnostic is not itself an error
//! worth reporting: the exit code still carries the outcome.

use colored::*;
use std::io::Write;

/// Logger with consistent `subject | message` formatting
///
/// The subject is usually a command identifier and is rendered in
/// cyan/bold. Colors follow `colored`'s global control, so callers that
/// capture output (tests, nested dispatches) can switch them off.
///
/// ## Example
///
/// ```rust
/// use cli_command::logger::Logger;
///
/// let mut out = Vec::new();
/// Logger.info(&mut out, "nightly-sync", "skipped");
/// assert!(String::from_utf8(out).unwrap().contains("skipped"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    pub fn info(&self, out: &mut dyn Write, subject: &str, msg: &str) {
        let _ = writeln!(out, "{} | {}", subject.cyan().bold(), msg);
    }

    pub fn error(&self, out: &mut dyn Write, subject: &str, msg: &str) {
        let _ = writeln!(out, "{} | {}", subject.cyan().bold(), msg.red());
    }
}
