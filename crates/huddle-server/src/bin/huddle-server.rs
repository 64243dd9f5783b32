//! Huddle server binary
//!
//! Loads configuration from the environment and serves the HTTP API.

use huddle_server::{logging, HuddleServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    tracing::info!("Starting Huddle server");
    tracing::info!("  API: http://{}", config.api_addr);
    tracing::info!("  Map: {} x {}", config.surface.width, config.surface.height);
    tracing::info!("  Capacity: {}", config.lobby.capacity);
    tracing::info!("  Threshold: {}", config.lobby.threshold);

    HuddleServer::new(config).serve().await?;

    Ok(())
}
