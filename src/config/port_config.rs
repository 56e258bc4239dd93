use serde::Deserialize;
use crate::bus::PORT_COUNT;
use crate::errors::{ConfigError, ConfigResult};

/// Root structure for loading `[[port]]` style TOML config
#[derive(Debug, Deserialize)]
pub struct PortConfig {
    #[serde(rename = "port")]
    pub ports: Vec<PortEntry>,
}

/// One smart port backed by an I2C device node
#[derive(Debug, Deserialize)]
pub struct PortEntry {
    /// Port number as printed on the controller, 1-12
    pub port: u8,
    pub path: String,
    pub address: u16,
    /// Register holding the device type byte
    pub device_type_register: u8,
}

impl PortConfig {
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let parsed: PortConfig = toml::from_str(content)?;
        for entry in parsed.ports.iter() {
            if entry.port == 0 || entry.port > PORT_COUNT {
                return Err(ConfigError::InvalidValue {
                    field: "port.port".to_string(),
                    reason: format!("{} is outside 1..={}", entry.port, PORT_COUNT),
                });
            }
        }
        Ok(parsed)
    }
}

/// Load port config file
pub fn load_port_config(path: &str) -> ConfigResult<PortConfig> {
    PortConfig::parse(&super::read_config(path)?)
}
