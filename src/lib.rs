// Public modules
pub mod bus;
pub mod codec;
pub mod config;
pub mod errors;
pub mod messages;
pub mod registry;
pub mod scheduler;
pub mod sensor;

// Re-export commonly used types
pub use bus::{PortHandle, Transport};
pub use errors::{VisionError, VisionResult};
pub use messages::{
    ClassifierSignature, DetectedObject, LedMode, ObjectList, RgbColor, WhiteBalanceMode,
};
pub use registry::find_first_sensor;
pub use sensor::VisionSensor;

use crate::bus::i2c::I2CBus;
use crate::config::{load_poll_config, load_port_config};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with default configuration
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();
}

/// Poll the first vision sensor found on the configured ports until Ctrl-C
pub async fn run_vision_demo(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("[iq-vision] starting up...");

    let port_config = load_port_config(&format!("{}/ports.toml", config_path))?;
    let poll_config = load_poll_config(&format!("{}/poll.toml", config_path))?;
    info!("[config] loaded {} port(s)", port_config.ports.len());

    let bus = I2CBus::from_config(&port_config)?;
    let mut sensor = VisionSensor::new(bus);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("[iq-vision] failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let summary = scheduler::run_object_poll(&mut sensor, &poll_config.poll, shutdown).await;
    info!(
        "[iq-vision] {} poll(s), {} with objects, {} error(s)",
        summary.polls, summary.detections, summary.errors
    );
    Ok(())
}
