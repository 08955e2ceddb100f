//! Binary entrypoint for the LOT API server.
use std::sync::Arc;

use lot_api::{run, AppState};
use lot_core::EngineConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Optional YAML engine config from LOT_CONFIG
    let config = match std::env::var("LOT_CONFIG") {
        Ok(path) => match EngineConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "failed to load configuration");
                std::process::exit(1);
            }
        },
        Err(_) => EngineConfig::default(),
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(error = %e, "failed to start engine");
            std::process::exit(1);
        }
    };

    // Default listen address can be overridden with LOT_ADDR
    let addr = std::env::var("LOT_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    if let Err(e) = run(&addr, state).await {
        tracing::error!(error = %e, addr = %addr, "server error");
        std::process::exit(1);
    }
}
