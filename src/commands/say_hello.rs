//! Greeting command without flags

use super::Command;
use anyhow::Result;
use std::io::Write;

/// Writes a fixed greeting
#[derive(Debug, Default, Clone, Copy)]
pub struct SayHello;

impl Command for SayHello {
    fn id(&self) -> &str {
        "say-hello"
    }

    fn description(&self) -> &str {
        "A basic command that will greet the user."
    }

    fn exec(&self, out: &mut dyn Write) -> Result<()> {
        out.write_all(b"Hello there!\n")?;
        Ok(())
    }
}
