//! User settings for the allowance tracker
//!
//! Manages user preferences: currency symbol, the timezone used for
//! day/month boundaries, and the category preselected for new expenses.

use serde::{Deserialize, Serialize};

use super::paths::AllowancePaths;
use super::timezone::DisplayZone;
use crate::error::AllowanceError;
use crate::models::ExpenseCategory;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol prefixed to every displayed amount
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Zone for "today" / "this month" and displayed times
    #[serde(default)]
    pub timezone: DisplayZone,

    /// Category used when none is given
    #[serde(default)]
    pub default_category: ExpenseCategory,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₦".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            timezone: DisplayZone::default(),
            default_category: ExpenseCategory::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &AllowancePaths) -> Result<Self, AllowanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AllowanceError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AllowanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AllowancePaths) -> Result<(), AllowanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AllowanceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AllowanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
