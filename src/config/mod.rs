pub mod port_config;
pub mod poll_config;

pub use port_config::{load_port_config, PortConfig, PortEntry};
pub use poll_config::{load_poll_config, PollConfig, PollSettings};

use crate::errors::{ConfigError, ConfigResult};
use std::fs;

fn read_config(path: &str) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
        path: path.to_string(),
        source,
    })
}
