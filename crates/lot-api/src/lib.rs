//! LOT API /v1: REST endpoints over the traceability engine
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use lot_core::{EngineConfig, LotError, LotResult, SpeciesCatalog};
use lot_record::TraceabilityEngine;

use crate::metrics::Metrics;

/// Shared state behind every handler
pub struct AppState {
    pub engine: TraceabilityEngine,
    pub catalog: SpeciesCatalog,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(engine: TraceabilityEngine, catalog: SpeciesCatalog) -> LotResult<Self> {
        let metrics = Metrics::new().map_err(|e| LotError::Config(format!("metrics: {}", e)))?;
        Ok(Self {
            engine,
            catalog,
            metrics,
        })
    }

    /// In-memory engine for a config, with the built-in Adriatic catalog
    pub fn from_config(config: &EngineConfig) -> LotResult<Self> {
        Self::new(TraceabilityEngine::in_memory(config)?, SpeciesCatalog::adriatic())
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/reference/zones", get(handlers::zones))
        .route("/v1/reference/gear", get(handlers::gear))
        .route("/v1/reference/species", get(handlers::species))
        .route("/v1/lots/generate", post(handlers::generate))
        .route("/v1/lots", post(handlers::create_lot).get(handlers::list_lots))
        .route("/v1/lots/{lot_id}", get(handlers::get_lot))
        .route("/v1/lots/{lot_id}/export/{target}", get(handlers::export_lot))
        .route("/v1/exports/csv", get(handlers::export_batch_csv))
        .route("/v1/stats/daily/{date}", get(handlers::daily_stats))
        .route("/v1/records/validate", post(handlers::validate_record))
        .route("/v1/records/export/{target}", post(handlers::export_record))
        .route("/metrics", get(handlers::metrics))
        .route_layer(from_fn_with_state(state.clone(), middleware::count_requests))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::cors()),
        )
        .with_state(state)
}

pub async fn run(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("LOT API listening on {}", addr);
    axum::serve(listener, app).await
}
