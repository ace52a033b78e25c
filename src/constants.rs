//! Central constants for the command framework

/// Built-in command names
pub mod commands {
    /// Reserved identifier that prints the command listing
    pub const HELP: &str = "help";

    /// Flag spellings that also request the listing
    pub const HELP_FLAGS: [&str; 2] = ["-h", "--help"];
}

/// Default values for command locking
pub mod lock {
    /// Suffix appended to a command identifier to form its lock file name
    pub const FILE_SUFFIX: &str = ".lock";
}

/// Default values for the demo application's configuration
pub mod config {
    /// Default settings file name, looked up in the working directory
    pub const DEFAULT_CONFIG_FILE: &str = "cli-demo.yaml";

    /// Environment variable overriding the settings file path
    pub const CONFIG_ENV: &str = "CLI_DEMO_CONFIG";

    /// Environment variable overriding the lock directory
    pub const LOCK_DIR_ENV: &str = "CLI_DEMO_LOCK_DIR";
}
