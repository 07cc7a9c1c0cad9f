//! Advisor configuration
//!
//! Every knob the stations disagree on lives here: the accepted dry-bulb
//! domain, the classification bands, history depth and the chart image
//! calibration. Missing JSON fields fall back to [`AdvisorConfig::default`].

use crate::advisory::{ClassifierThresholds, WindUpperBound};
use crate::chart::ChartCalibration;
use crate::error::{AdvisoryError, Result};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::physics::TemperatureDomain;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Full configuration for an [`crate::session::AdvisorySession`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Accepted dry-bulb range for Delta T
    pub temperature_domain: TemperatureDomain,
    /// Delta T and wind bands
    pub thresholds: ClassifierThresholds,
    /// Readings kept in memory
    pub history_capacity: usize,
    /// Reference chart calibration
    pub chart: ChartCalibration,
}

impl Default for AdvisorConfig {
    /// Early calculator settings: -50..60°C, 200 readings, 10 km/h wind bound
    fn default() -> Self {
        Self {
            temperature_domain: TemperatureDomain::WIDE,
            thresholds: ClassifierThresholds::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            chart: ChartCalibration::default(),
        }
    }
}

impl AdvisorConfig {
    /// Later dashboard settings: 0..50°C and a shorter 100-reading history
    pub fn narrow() -> Self {
        Self {
            temperature_domain: TemperatureDomain::NARROW,
            history_capacity: 100,
            ..Self::default()
        }
    }

    /// Replace the upper wind bound, keeping the other thresholds
    pub fn with_wind_bound(mut self, bound: WindUpperBound) -> Self {
        self.thresholds.wind_excellent_max_kmh = bound.kmh();
        self
    }

    /// Parse and validate a JSON document
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if the JSON is malformed or
    /// describes an invalid configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AdvisoryError::Configuration(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if the file cannot be read or
    /// does not hold a valid configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            AdvisoryError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    /// Serialize as pretty JSON
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AdvisoryError::Configuration(format!("failed to serialize config: {e}")))
    }

    /// Check every section
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` for the first invalid section.
    pub fn validate(&self) -> Result<()> {
        self.temperature_domain.validate()?;
        self.thresholds.validate()?;
        if self.history_capacity == 0 {
            return Err(AdvisoryError::Configuration(
                "history capacity must be at least 1".to_string(),
            ));
        }
        self.chart.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(AdvisorConfig::default().validate().is_ok());
        let narrow = AdvisorConfig::narrow();
        assert!(narrow.validate().is_ok());
        assert_eq!(narrow.temperature_domain, TemperatureDomain::NARROW);
        assert_eq!(narrow.history_capacity, 100);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AdvisorConfig::from_json_str(
            r#"{ "history_capacity": 50, "thresholds": { "wind_excellent_max_kmh": 12.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.thresholds.wind_excellent_max_kmh, 12.0);
        assert_eq!(config.thresholds.delta_t_low, 2.0);
        assert_eq!(config.temperature_domain, TemperatureDomain::WIDE);
    }

    #[test]
    fn test_json_round_trip() {
        let config = AdvisorConfig::narrow().with_wind_bound(WindUpperBound::Relaxed);
        let json = config.to_json_string().unwrap();
        assert_eq!(AdvisorConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            AdvisorConfig::from_json_str(r#"{ "history_capacity": 0 }"#),
            Err(AdvisoryError::Configuration(_))
        ));
        assert!(AdvisorConfig::from_json_str(
            r#"{ "temperature_domain": { "min": 10.0, "max": 0.0 } }"#
        )
        .is_err());
        assert!(AdvisorConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AdvisorConfig::load("/nonexistent/advisor.json").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
