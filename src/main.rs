//! Grid filesystem daemon - Entry Point
//!
//! Serves an in-memory grid filesystem over a line protocol.

use log::{error, info};
use std::process;
use std::sync::Arc;

use grid_fs::{GridConfig, GridFs, Server};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching grid filesystem server...");

    let config = match GridConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let fs = Arc::new(GridFs::from_config(&config.store));

    let server = match Server::bind(config.server, fs).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            process::exit(1);
        }
    };

    server.start().await;
}
