//! Match and manager configuration.
//!
//! Both structs deserialize with per-field defaults, so a config file only
//! needs the keys it overrides. `ManagerConfig::from_env` reads a JSON file
//! named by `CRICKET_SIM_CONFIG_PATH`.

use serde::{Deserialize, Serialize};
use std::{env, fs, time::Duration};

use crate::error::{MatchError, Result};

pub const CONFIG_PATH_ENV: &str = "CRICKET_SIM_CONFIG_PATH";

/// Default publish subject for live snapshots.
pub const DEFAULT_SUBJECT: &str = "stark.sports.data";

/// Format and limits of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Overs per innings (default: 2)
    pub total_overs: u32,
    /// Deliveries per over (default: 6)
    pub balls_per_over: u32,
    /// Wickets that end an innings (default: 10)
    pub max_wickets: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { total_overs: 2, balls_per_over: 6, max_wickets: 10 }
    }
}

impl MatchConfig {
    pub fn new(total_overs: u32, balls_per_over: u32, max_wickets: u32) -> Result<Self> {
        let config = Self { total_overs, balls_per_over, max_wickets };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_overs == 0 {
            return Err(MatchError::InvalidConfig("total_overs must be at least 1".into()));
        }
        if self.balls_per_over == 0 {
            return Err(MatchError::InvalidConfig("balls_per_over must be at least 1".into()));
        }
        if self.max_wickets == 0 {
            return Err(MatchError::InvalidConfig("max_wickets must be at least 1".into()));
        }
        if self.total_overs.checked_mul(self.balls_per_over).is_none() {
            return Err(MatchError::InvalidConfig(format!(
                "{} overs of {} balls exceeds the delivery limit",
                self.total_overs, self.balls_per_over
            )));
        }
        Ok(())
    }

    /// Legal deliveries available to one innings.
    pub fn max_balls(&self) -> u32 {
        self.total_overs.saturating_mul(self.balls_per_over)
    }
}

/// Continuous-match runner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub match_config: MatchConfig,
    /// Pause between deliveries (default: 15000ms)
    pub delivery_interval_ms: u64,
    /// Pause between matches (default: 2000ms)
    pub match_interval_ms: u64,
    /// Subject snapshots are published on
    pub subject: String,
    /// Venue line shown in snapshots and history
    pub venue: String,
    /// Seed for team selection and outcomes; random when absent
    pub seed: Option<u64>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            match_config: MatchConfig::default(),
            delivery_interval_ms: 15_000,
            match_interval_ms: 2_000,
            subject: DEFAULT_SUBJECT.to_string(),
            venue: "at Kanpur, Green Park".to_string(),
            seed: None,
        }
    }
}

impl ManagerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ManagerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `CRICKET_SIM_CONFIG_PATH`.
    ///
    /// An unset or blank variable yields the defaults.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };
        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            MatchError::Deserialization(msg) => {
                MatchError::Deserialization(format!("{path}: {msg}"))
            }
            other => other,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.match_config.validate()?;
        if self.subject.trim().is_empty() {
            return Err(MatchError::InvalidConfig("subject must not be empty".into()));
        }
        Ok(())
    }

    pub fn delivery_interval(&self) -> Duration {
        Duration::from_millis(self.delivery_interval_ms)
    }

    pub fn match_interval(&self) -> Duration {
        Duration::from_millis(self.match_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        assert!(MatchConfig::default().validate().is_ok());
        assert!(ManagerConfig::default().validate().is_ok());
        assert_eq!(MatchConfig::default().max_balls(), 12);
    }

    #[test]
    fn test_rejects_zero_balls_per_over() {
        assert!(matches!(MatchConfig::new(2, 0, 10), Err(MatchError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_delivery_count_overflow() {
        let err = MatchConfig::new(u32::MAX, 6, 10).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig(_)));
        assert!(MatchConfig::new(u32::MAX, 1, 10).is_ok());

        let unchecked = MatchConfig { total_overs: u32::MAX, balls_per_over: 6, max_wickets: 10 };
        assert_eq!(unchecked.max_balls(), u32::MAX);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            ManagerConfig::from_json(r#"{"delivery_interval_ms": 0, "match_config": {"total_overs": 5}}"#)
                .unwrap();
        assert_eq!(config.delivery_interval_ms, 0);
        assert_eq!(config.match_config.total_overs, 5);
        assert_eq!(config.match_config.balls_per_over, 6);
        assert_eq!(config.subject, DEFAULT_SUBJECT);
    }

    #[test]
    fn test_invalid_json_values_rejected() {
        let err = ManagerConfig::from_json(r#"{"subject": "  "}"#).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 7, "venue": "at Lord's"}}"#).unwrap();
        let config = ManagerConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.venue, "at Lord's");
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let err = ManagerConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, MatchError::Io(_)));
    }
}
