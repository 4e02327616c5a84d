use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;

use ferrotask::config::ServerConfig;
use ferrotask::handlers::AppState;
use ferrotask::routes::routes;

#[tokio::main]
async fn main() {
    // Load .env before logger init so RUST_LOG from the file is honored
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv_result {
        Ok(_) => info!("Environment variables loaded from .env file"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    // Load config from the environment
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration: host={}, port={}", config.host, config.port);
    if config.development_mode {
        warn!("Development mode is enabled");
    }

    // Shared state: auth primitives plus the in-memory storage provider
    let state = Arc::new(AppState::new(&config));
    let api = routes(state);

    // Build the server address
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    // Start the server
    info!("Starting Ferrotask server on {}", addr);

    warp::serve(api).run(addr).await;
}
