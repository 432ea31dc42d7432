//! Session configuration

use chess_core::{Color, DEFAULT_ALLOTMENT_SECS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session settings, loadable from TOML. Missing keys take their defaults.
///
/// ```toml
/// time_allotment_secs = 300
/// automated_move_delay_ms = 250
/// automated_color = "white"
/// seed = 7
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown per side at session start
    pub time_allotment_secs: u32,
    /// Period of the clock tick. One tick always charges one second.
    pub tick_interval_ms: u64,
    /// Pause before the automated opponent replies
    pub automated_move_delay_ms: u64,
    /// Side played by the automated opponent in human-vs-random mode
    pub automated_color: Color,
    /// Seed for the automated opponent (None = entropy)
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_allotment_secs: DEFAULT_ALLOTMENT_SECS,
            tick_interval_ms: 1000,
            automated_move_delay_ms: 500,
            automated_color: Color::Black,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_allotment_secs == 0 {
            return Err(ConfigError::Invalid(
                "time_allotment_secs must be positive".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn automated_move_delay(&self) -> Duration {
        Duration::from_millis(self.automated_move_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.time_allotment_secs, 600);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.automated_move_delay(), Duration::from_millis(500));
        assert_eq!(config.automated_color, Color::Black);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SessionConfig::from_toml_str(
            "time_allotment_secs = 300\nautomated_color = \"white\"\nseed = 7\n",
        )
        .unwrap();
        assert_eq!(config.time_allotment_secs, 300);
        assert_eq!(config.automated_color, Color::White);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.automated_move_delay_ms, 500);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            SessionConfig::from_toml_str("").unwrap(),
            SessionConfig::default()
        );
    }

    #[test]
    fn test_rejects_zero_allotment() {
        let err = SessionConfig::from_toml_str("time_allotment_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = SessionConfig::from_toml_str("automated_color = \"green\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SessionConfig::load(Path::new("/nonexistent/session.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
