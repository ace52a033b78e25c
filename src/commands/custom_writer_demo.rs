//! Command that dispatches into a private registry and captures the output

use super::{Command, SayHello};
use crate::bootstrap::bootstrap;
use crate::constants;
use crate::registry::CommandsRegistry;
use anyhow::Result;
use std::io::Write;

/// Runs `help` against an in-memory registry and prints what it captured
///
/// Shows that a dispatch can target any sink and, with a no-op exit
/// callback, never terminates the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomWriterDemo;

impl Command for CustomWriterDemo {
    fn id(&self) -> &str {
        "custom-writer-demo"
    }

    fn description(&self) -> &str {
        "Shows how to run bootstrap with a custom writer and capture output."
    }

    fn exec(&self, out: &mut dyn Write) -> Result<()> {
        let mut registry = CommandsRegistry::new();
        registry.register(Box::new(SayHello))?;

        let mut captured = Vec::new();
        let mut exit_code = None;
        bootstrap(
            &[constants::commands::HELP.to_string()],
            &mut registry,
            &mut captured,
            |code| exit_code = Some(code),
        );

        writeln!(out, "Captured output from custom writer demo:")?;
        out.write_all(&captured)?;
        if let Some(code) = exit_code.filter(|&code| code != 0) {
            anyhow::bail!("nested dispatch exited with code {}", code);
        }
        Ok(())
    }
}
