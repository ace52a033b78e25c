//! cli-command - register, configure, lock and dispatch CLI commands
//!
//! A host application registers [`Command`]s in a [`CommandsRegistry`] and
//! hands its arguments to [`bootstrap`]. The dispatcher resolves the
//! command, parses its flags, runs it inside a panic boundary and reports
//! an exit code through a callback. Wrapping a command in
//! [`LockableCommand`] keeps two processes from running it at once.

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod constants;
pub mod lock;
pub mod logger;
pub mod registry;
pub mod runner;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use bootstrap::{Dispatch, Terminal, bootstrap, dispatch};
pub use commands::{Command, Configurable};
pub use config::Settings;
pub use lock::LockableCommand;
pub use registry::{CommandsRegistry, RegistryError};
pub use runner::Outcome;
