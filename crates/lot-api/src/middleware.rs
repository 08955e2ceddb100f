//! Request middleware: CORS and per-route request counting.
use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::AppState;

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}

pub async fn count_requests(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    state.metrics.requests.with_label_values(&[route.as_str()]).inc();
    next.run(req).await
}
