//! Engine settings
//!
//! Tolerances and thresholds the engine applies, plus the timezone monthly
//! reports bucket in. Every field has a serde default so older or partial
//! settings files still load. Amounts are always formatted in reais.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::RateioError;
use crate::models::PERCENTAGE_TOLERANCE;
use crate::services::discrepancy::DEFAULT_DISCREPANCY_TOLERANCE;

/// Settings for the rateio engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Relative deviation between agreed and invoiced value still accepted
    #[serde(default = "default_discrepancy_tolerance")]
    pub discrepancy_tolerance: f64,

    /// Absolute slack allowed when allocation percentages are summed
    #[serde(default = "default_percentage_tolerance")]
    pub percentage_tolerance: f64,

    /// Fewest operations a shared expense may be split across
    #[serde(default = "default_min_shared_operations")]
    pub min_shared_operations: usize,

    /// Offset from UTC, in minutes, for month boundaries in reports
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_discrepancy_tolerance() -> f64 {
    DEFAULT_DISCREPANCY_TOLERANCE
}

fn default_percentage_tolerance() -> f64 {
    PERCENTAGE_TOLERANCE
}

fn default_min_shared_operations() -> usize {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            discrepancy_tolerance: default_discrepancy_tolerance(),
            percentage_tolerance: default_percentage_tolerance(),
            min_shared_operations: default_min_shared_operations(),
            utc_offset_minutes: 0,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self, RateioError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| RateioError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| RateioError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> Result<(), RateioError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RateioError::Io(format!("Failed to create settings directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| RateioError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| RateioError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject tolerances and offsets that cannot be applied
    pub fn validate(&self) -> Result<(), RateioError> {
        if !(self.discrepancy_tolerance.is_finite() && self.discrepancy_tolerance >= 0.0) {
            return Err(RateioError::Config(format!(
                "discrepancyTolerance must be a non-negative number, got {}",
                self.discrepancy_tolerance
            )));
        }
        if !(self.percentage_tolerance.is_finite() && self.percentage_tolerance > 0.0) {
            return Err(RateioError::Config(format!(
                "percentageTolerance must be positive, got {}",
                self.percentage_tolerance
            )));
        }
        if self.min_shared_operations == 0 {
            return Err(RateioError::Config(
                "minSharedOperations must be at least 1".into(),
            ));
        }
        self.timezone()?;
        Ok(())
    }

    /// The fixed offset month boundaries are computed in
    pub fn timezone(&self) -> Result<FixedOffset, RateioError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            RateioError::Config(format!(
                "utcOffsetMinutes out of range: {}",
                self.utc_offset_minutes
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.discrepancy_tolerance, 0.01);
        assert_eq!(settings.percentage_tolerance, 0.01);
        assert_eq!(settings.min_shared_operations, 2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        let settings = Settings::load_or_default(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config").join("settings.json");

        let mut settings = Settings::default();
        settings.discrepancy_tolerance = 0.05;
        settings.utc_offset_minutes = -180;
        settings.save(&path).unwrap();

        let loaded = Settings::load_or_default(&path).unwrap();
        assert_eq!(loaded.discrepancy_tolerance, 0.05);
        assert_eq!(loaded.timezone().unwrap(), FixedOffset::west_opt(3 * 3600).unwrap());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"minSharedOperations": 3}"#).unwrap();
        assert_eq!(settings.min_shared_operations, 3);
        assert_eq!(settings.percentage_tolerance, 0.01);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{"currencySymbol": "US$", "utcOffsetMinutes": -180}"#)
                .unwrap();
        assert_eq!(settings.utc_offset_minutes, -180);
        assert_eq!(serde_json::to_value(&settings).unwrap().get("currencySymbol"), None);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"percentageTolerance": -1}"#).unwrap();
        let err = Settings::load_or_default(&path).unwrap_err();
        assert!(matches!(err, RateioError::Config(_)));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Settings::load_or_default(&path),
            Err(RateioError::Config(_))
        ));
    }
}
