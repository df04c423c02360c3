//! Simulation configuration.
//!
//! Loaded from JSON; missing fields fall back to defaults. Environment
//! variables override file values.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Master switch for projectile interception.
    pub interception_enabled: bool,
    /// Whether shields regain energy every tick.
    pub recharge_enabled: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            interception_enabled: true,
            recharge_enabled: true,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Apply `SHIELDWALL_SEED` and `SHIELDWALL_INTERCEPTION` if set and valid.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(seed) = lookup("SHIELDWALL_SEED").and_then(|v| v.parse().ok()) {
            self.seed = seed;
        }
        if let Some(enabled) = lookup("SHIELDWALL_INTERCEPTION").and_then(|v| v.parse().ok()) {
            self.interception_enabled = enabled;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert!(config.interception_enabled);
        assert!(config.recharge_enabled);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SimConfig::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimConfig::load(Path::new("/nonexistent/shieldwall.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_overrides_ignore_garbage() {
        let config = SimConfig::default().with_overrides(|key| match key {
            "SHIELDWALL_SEED" => Some("1234".to_string()),
            "SHIELDWALL_INTERCEPTION" => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(config.seed, 1234);
        assert!(config.interception_enabled);
    }
}
