//! Hotel booking service
//!
//! Reads configuration from TOML (~/.config/hotel-booking/config.toml,
//! or the file named by `HOTEL_CONFIG`) and serves the REST API until
//! SIGINT/SIGTERM.

use tracing::{error, info};

use hotel_booking::server::{init_tracing, ServerHandle, ServerOptions};
use hotel_booking::{default_config_path, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = default_config_path();
    let (config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;
    handle.install_signal_handler();
    handle.wait().await;
    Ok(())
}
