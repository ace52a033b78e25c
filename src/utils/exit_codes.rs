//! Exit code conventions used by the dispatcher
//!
//! Every terminal state of a dispatch maps to exactly one of these codes.
//! A run that was skipped because another process holds the command lock
//! counts as [`SUCCESS`].

/// Command completed, a listing was printed, or the run was skipped by a lock
pub const SUCCESS: i32 = 0;

/// Command returned an error (including lock infrastructure failures)
pub const FAILURE: i32 = 1;

/// Command panicked while executing
pub const ABORTED: i32 = 2;

/// Flags could not be parsed or failed validation (`EX_USAGE`)
pub const CONFIG_ERROR: i32 = 64;

/// Requested command is not registered
pub const NOT_FOUND: i32 = 127;

/// Get a human-readable description for an exit code
pub fn describe(exit_code: i32) -> &'static str {
    match exit_code {
        SUCCESS => "success",
        FAILURE => "command failed",
        ABORTED => "command panicked",
        CONFIG_ERROR => "invalid command arguments",
        NOT_FOUND => "command not found",
        _ => "error",
    }
}
