//! Panic-safe command execution
//!
//! This is the single place where panics raised by command code are caught.
//! Anything wrapped around the command (such as a [`LockableCommand`]) has
//! already run its cleanup by the time the panic reaches this boundary.
//!
//! [`LockableCommand`]: crate::lock::LockableCommand

use crate::commands::Command;
use anyhow::Result;
use std::any::Any;
use std::cell::Cell;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static QUIET_HOOK: Once = Once::new();

/// Result of one command execution
#[derive(Debug)]
pub enum Outcome {
    /// Command returned `Ok`
    Success,
    /// Command returned an error
    Failure(anyhow::Error),
    /// Command panicked; carries the panic message
    Aborted(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Run `work`, returning its value or the panic message if it panicked.
///
/// While `work` runs on this thread the process panic hook stays silent, so
/// the caller alone decides where the panic is reported. Panics on other
/// threads, and outside any guard, still reach the previous hook.
pub fn guard<T, F>(work: F) -> std::result::Result<T, String>
where
    F: FnOnce() -> T,
{
    install_quiet_hook();
    let _depth = DepthGuard::enter();
    panic::catch_unwind(AssertUnwindSafe(work)).map_err(|payload| panic_message(&*payload))
}

/// Run `work`, turning a panic into [`Outcome::Aborted`]
pub fn run_guarded<F>(work: F) -> Outcome
where
    F: FnOnce() -> Result<()>,
{
    match guard(work) {
        Ok(Ok(())) => Outcome::Success,
        Ok(Err(e)) => Outcome::Failure(e),
        Err(msg) => Outcome::Aborted(msg),
    }
}

/// Execute a command against `out` inside the panic boundary
pub fn run_command(command: &dyn Command, out: &mut dyn Write) -> Outcome {
    run_guarded(|| command.exec(out))
}

pub(crate) fn is_guarded() -> bool {
    GUARD_DEPTH.with(|depth| depth.get() > 0)
}

// Installed once per process; swapping hooks per call would race between threads.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !is_guarded() {
                previous(info);
            }
        }));
    });
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        GUARD_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
