//! Command that panics, to exercise the panic boundary

use super::Command;
use anyhow::Result;
use std::io::Write;

pub const PANIC_MESSAGE: &str = "this is an intentional panic for demo purposes";

#[derive(Debug, Default, Clone, Copy)]
pub struct PanicDemo;

impl Command for PanicDemo {
    fn id(&self) -> &str {
        "panic-demo"
    }

    fn description(&self) -> &str {
        "Demonstrates panic-safe execution by intentionally panicking."
    }

    fn exec(&self, _out: &mut dyn Write) -> Result<()> {
        panic!("{}", PANIC_MESSAGE);
    }
}
