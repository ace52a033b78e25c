//! Cross-process mutual exclusion for commands
//!
//! [`LockableCommand`] wraps any [`Command`] so that at most one OS process
//! runs it at a time. Exclusion relies on an advisory OS file lock
//! (`flock` on Unix, `LockFileEx` on Windows) taken on
//! `<lock_dir>/<id>.lock`, never on the mere existence of the file, so a
//! holder that crashed cannot leave a stale lock behind.
//!
//! Contention is fail-fast: a process that finds the lock taken skips the
//! run and reports success instead of waiting.

use crate::commands::{Command, Configurable};
use crate::constants;
use crate::logger::Logger;
use anyhow::Result;
use std::fs::{File, OpenOptions, TryLockError};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};

/// Lock acquisition failures other than contention
#[derive(Debug)]
pub enum LockError {
    /// Lock file could not be opened or locked (missing or read-only
    /// directory, unsupported filesystem, ...)
    Infrastructure { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockError::Infrastructure { path, source } => {
                write!(f, "Cannot acquire lock '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LockError {}

/// An acquired command lock, released when dropped
///
/// Release unlocks and closes the file but leaves it on disk. Deleting it
/// would let a process that already opened the old file lock an unlinked
/// inode while a newcomer locks a fresh one.
#[derive(Debug)]
pub struct CommandLock {
    file: File,
    path: PathBuf,
}

impl CommandLock {
    /// Try to take the lock at `path` without blocking
    ///
    /// Returns `Ok(None)` when another holder has it.
    pub fn try_acquire(path: &Path) -> Result<Option<Self>, LockError> {
        let infrastructure = |source| LockError::Infrastructure {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(infrastructure)?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => return Ok(None),
            Err(TryLockError::Error(e)) => return Err(infrastructure(e)),
        }

        let mut lock = Self {
            file,
            path: path.to_path_buf(),
        };
        // Holder PID is informational only.
        let _ = lock.record_holder();
        Ok(Some(lock))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record_holder(&mut self) -> io::Result<()> {
        self.file.set_len(0)?;
        self.file.rewind()?;
        writeln!(self.file, "{}", std::process::id())?;
        self.file.flush()
    }
}

impl Drop for CommandLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Decorator that runs the wrapped command under a cross-process lock
///
/// ## Example
///
/// ```rust,no_run
/// use cli_command::commands::SayHello;
/// use cli_command::lock::LockableCommand;
/// use cli_command::CommandsRegistry;
///
/// let mut registry = CommandsRegistry::new();
/// registry
///     .register(Box::new(LockableCommand::new(SayHello, std::env::temp_dir())))
///     .unwrap();
/// ```
pub struct LockableCommand<C> {
    inner: C,
    lock_dir: PathBuf,
}

impl<C: Command> LockableCommand<C> {
    pub fn new(inner: C, lock_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            lock_dir: lock_dir.into(),
        }
    }

    /// Lock file used for the wrapped command: `<lock_dir>/<id>.lock`
    pub fn lock_path(&self) -> PathBuf {
        self.lock_dir.join(format!(
            "{}{}",
            self.inner.id(),
            constants::lock::FILE_SUFFIX
        ))
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Command> Command for LockableCommand<C> {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn exec(&self, out: &mut dyn Write) -> Result<()> {
        let path = self.lock_path();

        // Held until the end of this call, including while unwinding.
        let Some(_lock) = CommandLock::try_acquire(&path)? else {
            Logger.info(
                out,
                self.id(),
                &format!(
                    "Skipped: already running in another process (lock: {})",
                    path.display()
                ),
            );
            return Ok(());
        };

        self.inner.exec(out)
    }

    fn configurable(&mut self) -> Option<&mut dyn Configurable> {
        self.inner.configurable()
    }
}
