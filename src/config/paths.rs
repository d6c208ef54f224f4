//! Path management for gstr-ledger
//!
//! ## Path Resolution Order
//!
//! 1. `GSTR_LEDGER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`:
//!    `~/.config/gstr-ledger` on Linux, `~/Library/Application Support/gstr-ledger`
//!    on macOS, `%APPDATA%\gstr-ledger\config` on Windows

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "GSTR_LEDGER_DATA_DIR";

/// Manages all paths used by gstr-ledger
#[derive(Debug, Clone)]
pub struct GstrPaths {
    base_dir: PathBuf,
}

impl GstrPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the run journal
    pub fn journal_file(&self) -> PathBuf {
        self.base_dir.join("journal.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Whether settings have ever been saved
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    ProjectDirs::from("", "", "gstr-ledger")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LedgerError::Config("Could not determine the home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GstrPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.journal_file(), temp_dir.path().join("journal.log"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var(DATA_DIR_ENV, temp_dir.path());
        let paths = GstrPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GstrPaths::with_base_dir(temp_dir.path().join("nested").join("gstr"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().is_dir());
    }
}
