use serde::Deserialize;
use crate::errors::{ConfigError, ConfigResult};
use crate::messages::MAX_OBJECTS;
use std::time::Duration;

/// Root configuration struct expecting a `[poll]` table
#[derive(Debug, Deserialize)]
pub struct PollConfig {
    pub poll: PollSettings,
}

/// Object polling parameters for the demo loop
#[derive(Debug, Clone, Deserialize)]
pub struct PollSettings {
    /// Signature (1-7) or color code to query
    pub signature: i16,
    #[serde(default = "default_max_objects")]
    pub max_objects: usize,
    /// Poll rate in Hz
    #[serde(default = "default_frequency")]
    pub frequency: u32,
}

fn default_max_objects() -> usize {
    MAX_OBJECTS
}

fn default_frequency() -> u32 {
    5
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis((1000.0 / self.frequency as f32) as u64)
    }
}

impl PollConfig {
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let parsed: PollConfig = toml::from_str(content)?;
        if parsed.poll.signature <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll.signature".to_string(),
                reason: format!("{} is not a positive id", parsed.poll.signature),
            });
        }
        if parsed.poll.frequency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll.frequency".to_string(),
                reason: "must be at least 1 Hz".to_string(),
            });
        }
        Ok(parsed)
    }
}

/// Loads config from TOML file
pub fn load_poll_config(path: &str) -> ConfigResult<PollConfig> {
    PollConfig::parse(&super::read_config(path)?)
}
