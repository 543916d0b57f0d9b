//! Hotel booking service CLI server
//!
//! ```sh
//! # Run with default config (~/.config/hotel-booking/config.toml)
//! hotel-booking
//!
//! # Custom config path and port
//! hotel-booking --config /etc/hotel-booking/config.toml --port 8080
//!
//! # Validate config without starting
//! hotel-booking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use hotel_booking::config::AppConfig;
use hotel_booking::server::{init_tracing, ServerHandle, ServerOptions};

/// REST backend for hotels, rooms, clients, bookings and reviews.
#[derive(Parser, Debug)]
#[command(
    name = "hotel-booking",
    version,
    about = "Hotel booking REST service",
    long_about = "Hotel booking REST service with Swagger UI at /docs.\n\n\
                  Default config: ~/.config/hotel-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "HOTEL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin client.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(hotel_booking::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    if cli.check {
        if let Some(e) = load_error {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
        if let Err(e) = config.validate() {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Locale      : {}", config.i18n.locale);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    Ok(())
}
