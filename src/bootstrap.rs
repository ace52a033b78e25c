//! Top-level dispatch: arguments in, exit code out
//!
//! One dispatch walks a fixed sequence of states:
//!
//! 1. **Start**: no identifier (or `help`, `-h`, `--help`) prints the
//!    command listing.
//! 2. **Resolve**: the identifier is looked up in the registry.
//! 3. **Configure**: the remaining arguments are parsed against the
//!    command's flags, then validated.
//! 4. **Execute**: the command runs inside the panic boundary.
//!
//! Panics raised by command code while configuring or executing end in
//! [`Terminal::Crashed`], like panics raised by `exec`.
//!
//! Each path ends in a [`Terminal`] state with a fixed exit code from
//! [`exit_codes`]. The exit code is handed to a callback; nothing here
//! terminates the process.

use crate::commands::Command;
use crate::constants;
use crate::logger::Logger;
use crate::registry::CommandsRegistry;
use crate::runner::{self, Outcome};
use crate::utils::exit_codes;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ColorChoice};
use colored::*;
use serde::Serialize;
use std::io::Write;

/// Final state of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Listing or usage text was printed
    Listed,
    /// Identifier is not registered
    NotFound,
    /// Flags failed to parse or validate
    ConfigError,
    /// Command returned `Ok` (or was skipped by its lock)
    Completed,
    /// Command returned an error
    Failed,
    /// Command panicked
    Crashed,
}

impl Terminal {
    pub fn exit_code(self) -> i32 {
        match self {
            Terminal::Listed | Terminal::Completed => exit_codes::SUCCESS,
            Terminal::NotFound => exit_codes::NOT_FOUND,
            Terminal::ConfigError => exit_codes::CONFIG_ERROR,
            Terminal::Failed => exit_codes::FAILURE,
            Terminal::Crashed => exit_codes::ABORTED,
        }
    }
}

/// Result of one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub terminal: Terminal,
    pub exit_code: i32,
}

impl From<Terminal> for Dispatch {
    fn from(terminal: Terminal) -> Self {
        Self {
            terminal,
            exit_code: terminal.exit_code(),
        }
    }
}

/// Errors raised while configuring a command from its arguments
#[derive(Debug)]
pub enum ConfigureError {
    /// Arguments did not match the command's flags
    Parse(clap::Error),
    /// Parsed values were rejected by the command
    Validation(anyhow::Error),
}

impl std::fmt::Display for ConfigureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigureError::Parse(e) => {
                let rendered = e.render().to_string();
                let reason = rendered.trim().trim_start_matches("error: ");
                write!(f, "Invalid arguments: {}", reason)
            }
            ConfigureError::Validation(e) => write!(f, "Invalid configuration: {:#}", e),
        }
    }
}

impl std::error::Error for ConfigureError {}

/// Output format for a command in `help --json` mode
#[derive(Serialize)]
struct CommandOutput {
    id: String,
    description: String,
}

/// Build the flag set for a command
///
/// Commands without the [`Configurable`](crate::commands::Configurable)
/// capability get an empty set, so stray arguments are rejected and
/// `--help` still works.
pub fn flag_set(command: &mut dyn Command) -> clap::Command {
    let flags = clap::Command::new(command.id().to_string())
        .about(command.description().to_string())
        .no_binary_name(true)
        .disable_version_flag(true)
        .color(ColorChoice::Never);

    match command.configurable() {
        Some(configurable) => configurable.define_flags(flags),
        None => flags,
    }
}

/// Parse `args` into the command's flags and validate them
pub fn configure(command: &mut dyn Command, args: &[String]) -> Result<(), ConfigureError> {
    let matches = flag_set(command)
        .try_get_matches_from(args)
        .map_err(ConfigureError::Parse)?;

    if let Some(configurable) = command.configurable() {
        configurable
            .apply_flags(&matches)
            .map_err(ConfigureError::Parse)?;
        configurable
            .validate_flags()
            .map_err(ConfigureError::Validation)?;
    }

    Ok(())
}

/// Resolve, configure and execute the command named by `args[0]`
///
/// `args` must not include the program name.
pub fn dispatch(args: &[String], registry: &mut CommandsRegistry, out: &mut dyn Write) -> Dispatch {
    let Some((requested, rest)) = args.split_first() else {
        return list_commands(registry, out, false);
    };

    if constants::commands::HELP_FLAGS.contains(&requested.as_str()) {
        return list_commands(registry, out, false);
    }
    if requested == constants::commands::HELP {
        return help(rest, registry, out);
    }

    let Some(command) = registry.lookup_mut(requested) else {
        return not_found(requested, registry, out);
    };

    let id = command.id().to_string();
    let configured = match runner::guard(|| configure(command, rest)) {
        Ok(configured) => configured,
        Err(msg) => return crashed(out, &id, &format!("Panicked while configuring: {}", msg)),
    };
    match configured {
        Ok(()) => {}
        Err(ConfigureError::Parse(e)) if e.kind() == ErrorKind::DisplayHelp => {
            let _ = write!(out, "{}", e.render());
            return Terminal::Listed.into();
        }
        Err(e) => {
            Logger.error(out, &id, &e.to_string());
            return Terminal::ConfigError.into();
        }
    }

    match runner::run_command(command, out) {
        Outcome::Success => Terminal::Completed.into(),
        Outcome::Failure(e) => {
            let code = exit_codes::FAILURE;
            let detail = format!("{:#} (exit {}: {})", e, code, exit_codes::describe(code));
            Logger.error(out, &id, &detail);
            Terminal::Failed.into()
        }
        Outcome::Aborted(msg) => crashed(out, &id, &format!("Panicked: {}", msg)),
    }
}

fn crashed(out: &mut dyn Write, id: &str, message: &str) -> Dispatch {
    let code = exit_codes::ABORTED;
    let detail = format!("{} (exit {}: {})", message, code, exit_codes::describe(code));
    Logger.error(out, id, &detail);
    Terminal::Crashed.into()
}

/// Dispatch `args` and hand the resulting exit code to `exit`
///
/// Pass a closure calling `std::process::exit` to terminate the process, or
/// a no-op closure to run a dispatch in-process.
pub fn bootstrap<F>(args: &[String], registry: &mut CommandsRegistry, out: &mut dyn Write, exit: F)
where
    F: FnOnce(i32),
{
    let result = dispatch(args, registry, out);
    let _ = out.flush();
    exit(result.exit_code);
}

fn help_flags() -> clap::Command {
    clap::Command::new(constants::commands::HELP)
        .about("List available commands, or show the flags of one command")
        .no_binary_name(true)
        .color(ColorChoice::Never)
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output the command list as JSON"),
        )
        .arg(
            Arg::new("command")
                .value_name("COMMAND")
                .help("Command to describe"),
        )
}

fn help(args: &[String], registry: &mut CommandsRegistry, out: &mut dyn Write) -> Dispatch {
    let matches = match help_flags().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            let _ = write!(out, "{}", e.render());
            return Terminal::Listed.into();
        }
        Err(e) => {
            Logger.error(
                out,
                constants::commands::HELP,
                &ConfigureError::Parse(e).to_string(),
            );
            return Terminal::ConfigError.into();
        }
    };

    let json = matches.get_flag("json");
    let Some(requested) = matches.get_one::<String>("command") else {
        return list_commands(registry, out, json);
    };

    let Some(command) = registry.lookup_mut(requested) else {
        return not_found(requested, registry, out);
    };

    let id = command.id().to_string();
    match runner::guard(|| flag_set(command).render_help()) {
        Ok(usage) => {
            let _ = write!(out, "{}", usage);
            Terminal::Listed.into()
        }
        Err(msg) => crashed(out, &id, &format!("Panicked while describing flags: {}", msg)),
    }
}

fn list_commands(registry: &CommandsRegistry, out: &mut dyn Write, json: bool) -> Dispatch {
    let commands = registry.list();

    if json {
        let output: Vec<CommandOutput> = commands
            .into_iter()
            .map(|(id, description)| CommandOutput { id, description })
            .collect();
        return match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                let _ = writeln!(out, "{}", text);
                Terminal::Listed.into()
            }
            Err(e) => {
                Logger.error(out, constants::commands::HELP, &e.to_string());
                Terminal::Failed.into()
            }
        };
    }

    if commands.is_empty() {
        let _ = writeln!(out, "No commands are registered.");
        return Terminal::Listed.into();
    }

    let width = commands.iter().map(|(id, _)| id.len()).max().unwrap_or(0);
    let _ = writeln!(out, "Available commands:");
    for (id, description) in &commands {
        let _ = writeln!(out, "  {}  {}", format!("{:<width$}", id).bold(), description);
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Run '{} <command>' to see the flags of a command.",
        constants::commands::HELP
    );

    Terminal::Listed.into()
}

fn not_found(requested: &str, registry: &CommandsRegistry, out: &mut dyn Write) -> Dispatch {
    Logger.error(out, requested, "Unknown command");

    let ids = registry.ids();
    if ids.is_empty() {
        let _ = writeln!(out, "No commands are registered.");
    } else {
        let _ = writeln!(out, "Available commands: {}", ids.join(", "));
    }

    Terminal::NotFound.into()
}
