use crate::scenario::ScenarioError;

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Scenario(ScenarioError),
    Timeout,
    DepthRange(f64, f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse JSON: {}", e),
            ConfigError::Scenario(e) => write!(f, "Invalid scenario: {}", e),
            ConfigError::Timeout => write!(f, "timeout_secs should be greater than 0"),
            ConfigError::DepthRange(lo, hi) => {
                write!(f, "depth_range [{}, {}] should have lo <= hi", lo, hi)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Scenario(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> ConfigError {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::Json(err)
    }
}

impl From<ScenarioError> for ConfigError {
    fn from(err: ScenarioError) -> ConfigError {
        ConfigError::Scenario(err)
    }
}
