//! Utility modules for common functionality

pub mod duration;
pub mod exit_codes;
pub mod validators;

// Re-export commonly used functions
pub use duration::parse_duration;
pub use validators::is_valid_identifier;
