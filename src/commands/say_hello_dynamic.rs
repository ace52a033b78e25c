//! Greeting command configured through flags

use super::{Command, Configurable};
use crate::utils::parse_duration;
use anyhow::Result;
use clap::{ArgMatches, Args, FromArgMatches};
use std::io::Write;
use std::time::Duration;

/// Flags accepted by [`SayHelloDynamic`]
#[derive(Debug, Clone, PartialEq, Args)]
pub struct SayHelloFlags {
    /// Specify the user name to greet
    #[arg(long, default_value = "")]
    pub name: String,

    /// Specify the number of times to greet
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub count_to: i64,

    /// Specify the delay between greet repeats (e.g. 500ms, 1s)
    #[arg(long, default_value = "1s", value_parser = parse_duration)]
    pub count_delay: Duration,
}

impl Default for SayHelloFlags {
    fn default() -> Self {
        Self {
            name: String::new(),
            count_to: 1,
            count_delay: Duration::from_secs(1),
        }
    }
}

/// Greets `--name` `--count-to` times, pausing `--count-delay` in between
#[derive(Debug, Default, Clone)]
pub struct SayHelloDynamic {
    pub flags: SayHelloFlags,
}

impl SayHelloDynamic {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for SayHelloDynamic {
    fn id(&self) -> &str {
        "say-hello-dynamic"
    }

    fn description(&self) -> &str {
        "A basic command that will greet the user based on the given input."
    }

    fn exec(&self, out: &mut dyn Write) -> Result<()> {
        for i in 0..self.flags.count_to {
            if i > 0 {
                std::thread::sleep(self.flags.count_delay);
            }
            writeln!(out, "Hello there {}", self.flags.name)?;
            out.flush()?;
        }
        Ok(())
    }

    fn configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for SayHelloDynamic {
    fn define_flags(&self, flags: clap::Command) -> clap::Command {
        SayHelloFlags::augment_args(flags)
    }

    fn apply_flags(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        self.flags.update_from_arg_matches(matches)
    }

    fn validate_flags(&self) -> Result<()> {
        if self.flags.count_to <= 0 || self.flags.count_delay.is_zero() {
            anyhow::bail!(
                "count-to and count-delay must be greater than 0, got {}, {:?}",
                self.flags.count_to,
                self.flags.count_delay
            );
        }
        Ok(())
    }
}
