//! Common test support utilities and fixtures
//!
//! Shared by the integration tests through `mod support;`.

#![allow(dead_code)]

use anyhow::Result;
use cli_command::{Command, CommandsRegistry, Dispatch, dispatch};
use std::io::Write;
use std::path::Path;
use std::process::Command as Process;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of running the demo binary
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Output of an in-process dispatch
#[derive(Debug)]
pub struct Captured {
    pub dispatch: Dispatch,
    pub output: String,
}

/// Convert string literals to an argument vector
pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Dispatch against `registry` with colors off and capture the sink
pub fn capture(registry: &mut CommandsRegistry, argv: &[&str]) -> Captured {
    colored::control::set_override(false);

    let mut out = Vec::new();
    let dispatch = dispatch(&args(argv), registry, &mut out);
    Captured {
        dispatch,
        output: String::from_utf8(out).expect("dispatch output is UTF-8"),
    }
}

/// Command with a configurable behavior that counts its executions
pub struct Scripted {
    pub id: &'static str,
    pub description: &'static str,
    pub behavior: Behavior,
    pub runs: Arc<AtomicUsize>,
}

#[derive(Clone, Copy)]
pub enum Behavior {
    Print(&'static str),
    Fail(&'static str),
    Panic(&'static str),
}

impl Scripted {
    pub fn new(id: &'static str, description: &'static str, behavior: Behavior) -> Self {
        Self {
            id,
            description,
            behavior,
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn runs(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.runs)
    }
}

impl Command for Scripted {
    fn id(&self) -> &str {
        self.id
    }

    fn description(&self) -> &str {
        self.description
    }

    fn exec(&self, out: &mut dyn Write) -> Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Print(text) => {
                out.write_all(text.as_bytes())?;
                Ok(())
            }
            Behavior::Fail(reason) => anyhow::bail!("{}", reason),
            Behavior::Panic(reason) => panic!("{}", reason),
        }
    }
}

/// Run the compiled demo binary with `args`
pub fn run_cli(args: &[&str], envs: &[(&str, &Path)]) -> CliOutput {
    let mut cmd = Process::new(env!("CARGO_BIN_EXE_cli-demo"));
    cmd.args(args);
    cmd.env_remove("CLI_DEMO_CONFIG");
    cmd.env_remove("CLI_DEMO_LOCK_DIR");
    cmd.env("NO_COLOR", "1");
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("Failed to execute cli-demo");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
