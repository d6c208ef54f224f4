//! User settings for gstr-ledger
//!
//! Manages user preferences: distribution precision and range policy,
//! currency symbol, date display format, and whether runs are journaled.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::GstrPaths;
use crate::error::LedgerError;
use crate::models::{Precision, RangePolicy};
use crate::services::DistributionConfig;

/// User settings for gstr-ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Decimal places of distributed parts (0 or 2)
    #[serde(default)]
    pub precision: Precision,

    /// How ranges longer than 30 days are treated
    #[serde(default)]
    pub range_policy: RangePolicy,

    /// Currency symbol shown in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for terminal output (strftime format)
    #[serde(default = "default_date_format")]
    pub display_date_format: String,

    /// Whether runs are appended to the journal
    #[serde(default = "default_journal_enabled")]
    pub journal_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_journal_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            precision: Precision::default(),
            range_policy: RangePolicy::default(),
            currency_symbol: default_currency(),
            display_date_format: default_date_format(),
            journal_enabled: default_journal_enabled(),
        }
    }
}

impl Settings {
    /// Distributor configuration from these settings
    pub fn distribution_config(&self) -> DistributionConfig {
        DistributionConfig {
            precision: self.precision,
            range_policy: self.range_policy,
        }
    }

    /// The display date format, falling back to the default if it is malformed
    pub fn date_format(&self) -> &str {
        if is_valid_date_format(&self.display_date_format) {
            &self.display_date_format
        } else {
            "%d/%m/%Y"
        }
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &GstrPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Not saved until the caller asks
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GstrPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

/// Whether `format` is a strftime pattern chrono can render
pub fn is_valid_date_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.precision, Precision::Cents);
        assert_eq!(settings.range_policy, RangePolicy::Leading);
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.display_date_format, "%d/%m/%Y");
        assert!(settings.journal_enabled);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GstrPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            precision: Precision::Whole,
            range_policy: RangePolicy::Exact,
            journal_enabled: false,
            ..Default::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);

        let contents = std::fs::read_to_string(paths.settings_file()).unwrap();
        assert!(contents.contains("\"precision\": 0"));
        assert!(contents.contains("\"range_policy\": \"exact\""));
    }

    #[test]
    fn test_missing_fields_default() {
        let settings: Settings = serde_json::from_str(r#"{"precision": 0}"#).unwrap();
        assert_eq!(settings.precision, Precision::Whole);
        assert_eq!(settings.currency_symbol, "₹");
        assert!(settings.journal_enabled);
    }

    #[test]
    fn test_invalid_precision_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GstrPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"precision": 3}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn test_date_format_fallback() {
        let mut settings = Settings::default();
        settings.display_date_format = "%Y-%m-%d".into();
        assert_eq!(settings.date_format(), "%Y-%m-%d");

        settings.display_date_format = "%Q".into();
        assert!(!is_valid_date_format("%Q"));
        assert_eq!(settings.date_format(), "%d/%m/%Y");
    }

    #[test]
    fn test_distribution_config() {
        let settings = Settings {
            precision: Precision::Whole,
            ..Default::default()
        };
        let config = settings.distribution_config();
        assert_eq!(config.precision, Precision::Whole);
        assert_eq!(config.range_policy, RangePolicy::Leading);
    }
}
