//! Analysis configuration

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Timestamp layouts tried in order when reading join/leave cells
pub const DEFAULT_TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Census grid step in minutes
    pub resolution_minutes: u32,

    /// Max session overlay rows honoured per run
    pub max_overlays: usize,

    /// Width of the duration histogram bins
    pub histogram_bin_minutes: u64,

    /// chrono format strings for join/leave timestamps
    pub timestamp_formats: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            resolution_minutes: 1,
            max_overlays: 10,
            histogram_bin_minutes: 10,
            timestamp_formats: DEFAULT_TIMESTAMP_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.resolution_minutes == 0 {
            return Err(AnalysisError::InvalidConfig(
                "resolution_minutes must be at least 1".to_string(),
            ));
        }
        if self.timestamp_formats.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "timestamp_formats must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert_eq!(config.resolution_minutes, 1);
        assert_eq!(config.max_overlays, 10);
        assert_eq!(config.histogram_bin_minutes, 10);
        assert_eq!(config.timestamp_formats[0], "%m/%d/%Y %I:%M:%S %p");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = Config::from_json(r#"{"max_overlays": 3}"#).unwrap();
        assert_eq!(config.max_overlays, 3);
        assert_eq!(config.resolution_minutes, 1);
        assert!(!config.timestamp_formats.is_empty());
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let result = Config::from_json(r#"{"resolution_minutes": 0}"#);
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_formats_rejected() {
        let mut config = Config::new();
        config.timestamp_formats.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(
            Config::from_json("{"),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
