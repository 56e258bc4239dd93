use iq_vision::{init_tracing, run_vision_demo};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=iq_vision=trace to see register traffic
    init_tracing();

    // Load configuration from CONFIG_PATH or default
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
    tracing::info!("[iq-vision] configuration path: {}", config_path);

    run_vision_demo(&config_path).await
}
