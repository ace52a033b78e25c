//! Settings file loading for the demo application

use crate::constants;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
///
/// Loaded from a YAML file such as:
///
/// ```yaml
/// lock_dir: /var/lock/cli-demo
/// color: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory holding command lock files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_dir: Option<PathBuf>,
    /// Force colored diagnostics on or off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        // An empty file deserializes to null rather than an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Resolve settings for the current process
    ///
    /// The file named by `CLI_DEMO_CONFIG` is required to exist; otherwise
    /// `cli-demo.yaml` in the working directory is read when present.
    /// `CLI_DEMO_LOCK_DIR` overrides the lock directory from either source.
    pub fn from_env() -> Result<Self> {
        let mut settings = match std::env::var_os(constants::config::CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => {
                let default_path = Path::new(constants::config::DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(dir) = std::env::var_os(constants::config::LOCK_DIR_ENV)
            && !dir.is_empty()
        {
            settings.lock_dir = Some(PathBuf::from(dir));
        }

        Ok(settings)
    }

    /// Lock directory, falling back to the system temporary directory
    pub fn lock_dir(&self) -> PathBuf {
        self.lock_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        unsafe {
            env::remove_var(constants::config::CONFIG_ENV);
            env::remove_var(constants::config::LOCK_DIR_ENV);
        }
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "lock_dir: /srv/locks\ncolor: false\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.lock_dir, Some(PathBuf::from("/srv/locks")));
        assert_eq!(settings.color, Some(false));
        assert_eq!(settings.lock_dir(), PathBuf::from("/srv/locks"));
    }

    #[test]
    fn test_load_empty_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "lockdir: /typo\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }

    #[test]
    fn test_lock_dir_defaults_to_temp_dir() {
        assert_eq!(Settings::default().lock_dir(), env::temp_dir());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_named_file_and_override() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "lock_dir: /from/file\ncolor: true\n").unwrap();

        unsafe {
            env::set_var(constants::config::CONFIG_ENV, &path);
        }
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.lock_dir, Some(PathBuf::from("/from/file")));
        assert_eq!(settings.color, Some(true));

        unsafe {
            env::set_var(constants::config::LOCK_DIR_ENV, "/from/env");
        }
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.lock_dir, Some(PathBuf::from("/from/env")));
        assert_eq!(settings.color, Some(true));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_named_file_is_error() {
        clear_env();
        unsafe {
            env::set_var(constants::config::CONFIG_ENV, "/no/such/settings.yaml");
        }
        assert!(Settings::from_env().is_err());
        clear_env();
    }
}
