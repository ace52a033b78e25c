//! Command identifier validation
//!
//! Identifiers double as registry keys and lock file names, so they are
//! restricted to characters that are safe as a single path segment on every
//! platform.

use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("identifier pattern is valid")
});

/// Check that an identifier is non-empty and safe as a path segment
///
/// Identifiers must start with an ASCII letter or digit and may then contain
/// letters, digits, `.`, `_` and `-`.
pub fn is_valid_identifier(id: &str) -> bool {
    IDENTIFIER.is_match(id)
}
