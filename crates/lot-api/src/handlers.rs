//! API Handlers
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use lot_core::reference::{CROATIAN_FAO_ZONES, GEAR_CATEGORIES};
use lot_core::{
    CatchInput, LotError, LotPattern, Species, SpeciesCategory, TraceabilityRecord, VesselConfig,
    ENGINE_VERSION,
};
use lot_out::ExportTarget;
use lot_quality::ValidationReport;
use lot_record::DailyStats;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub species: Species,
    pub vessel: VesselConfig,
    #[serde(default)]
    pub pattern: Option<LotPattern>,
    pub catch_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub lot_id: String,
    pub pattern: String,
    /// false: a second call with the same inputs yields the same identifier
    pub allocates_counter: bool,
}

/// `?q=` name search, `?category=` filter; both optional
#[derive(Debug, Default, Deserialize)]
pub struct SpeciesQuery {
    pub q: Option<String>,
    pub category: Option<SpeciesCategory>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LotsQuery {
    /// Only LOTs caught on this date (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LotCreated {
    pub record: TraceabilityRecord,
    pub warnings: Vec<String>,
    pub exempt_eligible: bool,
}

/// Count the failure, then hand it to the error response
fn failed(state: &AppState, err: LotError) -> ApiError {
    state.metrics.lot_errors.with_label_values(&[err.code()]).inc();
    ApiError(err)
}

fn exported(state: &AppState, target: ExportTarget, body: String) -> Response {
    state.metrics.exports.with_label_values(&[target.as_str()]).inc();
    ([(header::CONTENT_TYPE, target.content_type())], body).into_response()
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": ENGINE_VERSION,
        "profile": state.engine.builder().validator().profile().name,
        "lots": state.engine.len(),
    }))
}

pub async fn zones() -> Json<Value> {
    Json(json!({ "zones": CROATIAN_FAO_ZONES }))
}

pub async fn gear() -> Json<Value> {
    Json(json!({ "gear": GEAR_CATEGORIES }))
}

pub async fn species(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SpeciesQuery>,
) -> Json<Vec<Species>> {
    let mut found: Vec<&Species> = match (&query.q, query.category) {
        (Some(term), _) => state.catalog.search(term),
        (None, Some(category)) => state.catalog.by_category(category),
        (None, None) => state.catalog.iter().collect(),
    };
    if let Some(category) = query.category {
        found.retain(|s| s.category == category);
    }
    Json(found.into_iter().cloned().collect())
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    let pattern = req
        .pattern
        .unwrap_or_else(|| state.engine.default_pattern().clone());
    let lot_id = state
        .engine
        .generate_lot_id(&req.species, &req.vessel, Some(&pattern), req.catch_date)
        .map_err(|e| failed(&state, e))?;

    Ok(Json(GenerateResponse {
        lot_id,
        pattern: pattern.name().to_string(),
        allocates_counter: pattern.allocates_counter(),
    }))
}

pub async fn create_lot(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CatchInput>,
) -> ApiResult<(StatusCode, Json<LotCreated>)> {
    let created = state.engine.create_lot(&input).map_err(|e| failed(&state, e))?;
    state.metrics.lots_created.inc();

    Ok((
        StatusCode::CREATED,
        Json(LotCreated {
            record: created.record,
            warnings: created.report.warnings,
            exempt_eligible: created.report.exempt_eligible,
        }),
    ))
}

pub async fn list_lots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LotsQuery>,
) -> Json<Vec<TraceabilityRecord>> {
    match query.date {
        Some(date) => Json(state.engine.records_on(date)),
        None => Json(state.engine.records()),
    }
}

pub async fn daily_stats(
    State(state): State<Arc<AppState>>,
    Path(date): Path<NaiveDate>,
) -> Json<DailyStats> {
    Json(state.engine.daily_stats(date))
}

pub async fn get_lot(
    State(state): State<Arc<AppState>>,
    Path(lot_id): Path<String>,
) -> ApiResult<Json<TraceabilityRecord>> {
    state
        .engine
        .get(&lot_id)
        .map(Json)
        .map_err(|e| failed(&state, e))
}

/// Takes raw JSON so a malformed record still gets a full report
pub async fn validate_record(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Json<ValidationReport> {
    Json(state.engine.validate_value(body))
}

pub async fn export_record(
    State(state): State<Arc<AppState>>,
    Path(target): Path<String>,
    Json(record): Json<TraceabilityRecord>,
) -> ApiResult<Response> {
    let target: ExportTarget = target.parse().map_err(|e| failed(&state, e))?;
    let body = state
        .engine
        .format(&record, target)
        .map_err(|e| failed(&state, e))?;
    Ok(exported(&state, target, body))
}

pub async fn export_lot(
    State(state): State<Arc<AppState>>,
    Path((lot_id, target)): Path<(String, String)>,
) -> ApiResult<Response> {
    let target: ExportTarget = target.parse().map_err(|e| failed(&state, e))?;
    let body = state
        .engine
        .export(&lot_id, target)
        .map_err(|e| failed(&state, e))?;
    Ok(exported(&state, target, body))
}

pub async fn export_batch_csv(State(state): State<Arc<AppState>>) -> Response {
    let body = state.engine.export_batch_csv();
    exported(&state, ExportTarget::Csv, body)
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.encode() {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
