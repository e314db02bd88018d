//! Path management for the allowance tracker
//!
//! ## Path Resolution Order
//!
//! 1. `ALLOWANCE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/allowance-cli` on Linux,
//!    `~/Library/Application Support/allowance-cli` on macOS,
//!    `%APPDATA%\allowance-cli` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::AllowanceError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "ALLOWANCE_DATA_DIR";

/// Manages all paths used by the allowance tracker
#[derive(Debug, Clone)]
pub struct AllowancePaths {
    /// Base directory for all data
    base_dir: PathBuf,
}

impl AllowancePaths {
    /// Create a new AllowancePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the home directory
    /// cannot be determined.
    pub fn new() -> Result<Self, AllowanceError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create AllowancePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per storage slot
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Append-only JSONL audit trail
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Diagnostic log used while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("allowance.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), AllowanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AllowanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AllowanceError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if `init` has been run (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, AllowanceError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| AllowanceError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("allowance-cli"))
}
