//! Base types and traits for the command pattern

use anyhow::Result;
use clap::ArgMatches;
use std::io::Write;

/// Trait that all commands must implement
///
/// A command is a named unit of work. It writes only to the sink it is
/// given, so its output can be redirected or captured by the caller.
pub trait Command {
    /// Stable identifier used as the registry key and the lock file name
    fn id(&self) -> &str;

    /// One-line description shown in the command listing
    fn description(&self) -> &str;

    /// Execute the command, writing any output to `out`
    fn exec(&self, out: &mut dyn Write) -> Result<()>;

    /// Flag configuration capability, if the command takes flags
    ///
    /// Commands without startup parameters keep the default `None`.
    fn configurable(&mut self) -> Option<&mut dyn Configurable> {
        None
    }
}

/// Optional capability for commands that take typed flags
///
/// The dispatcher calls these in a fixed order: [`define_flags`],
/// then (after clap parsed the arguments) [`apply_flags`], then
/// [`validate_flags`]. Validation only runs when parsing succeeded.
///
/// Commands that keep their flags in a `#[derive(clap::Args)]` struct can
/// implement the first two with `Args::augment_args` and
/// `FromArgMatches::update_from_arg_matches`.
///
/// [`define_flags`]: Configurable::define_flags
/// [`apply_flags`]: Configurable::apply_flags
/// [`validate_flags`]: Configurable::validate_flags
pub trait Configurable {
    /// Register the command's options on the clap command
    fn define_flags(&self, flags: clap::Command) -> clap::Command;

    /// Copy parsed values into the fields the command owns
    fn apply_flags(&mut self, matches: &ArgMatches) -> std::result::Result<(), clap::Error>;

    /// Check domain constraints on the parsed values
    fn validate_flags(&self) -> Result<()>;
}
