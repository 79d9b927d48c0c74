//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    ComputeFlowSeriesRequest, CreateItemRequest, FlowSeriesQuery, FlowSeriesResponse,
    HealthResponse, ItemInfo, ItemListResponse, MovementsPayload, PresetDto, PresetListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{ItemId, WindowPreset};
use crate::services::compute_flow_series as run_engine;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repository = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        repository,
    }))
}

/// GET /v1/presets
///
/// Window presets in display order.
pub async fn list_presets(State(state): State<AppState>) -> HandlerResult<PresetListResponse> {
    Ok(Json(PresetListResponse {
        presets: WindowPreset::ALL.into_iter().map(PresetDto::from).collect(),
        default_preset: state.chart.default_preset,
    }))
}

// =============================================================================
// Items
// =============================================================================

/// GET /v1/items
pub async fn list_items(State(state): State<AppState>) -> HandlerResult<ItemListResponse> {
    let items = db_services::list_items(state.repository.as_ref()).await?;
    let total = items.len();
    Ok(Json(ItemListResponse { items, total }))
}

/// POST /v1/items
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemInfo>), AppError> {
    let Json(request) = payload?;
    let info =
        db_services::store_item(state.repository.as_ref(), &request.name, request.movements)
            .await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// GET /v1/items/{item_id}/movements
pub async fn get_item_movements(
    State(state): State<AppState>,
    Path(item_id): Path<ItemId>,
) -> HandlerResult<MovementsPayload> {
    let movements = db_services::get_item_movements(state.repository.as_ref(), item_id).await?;
    Ok(Json(MovementsPayload { movements }))
}

/// POST /v1/items/{item_id}/movements
pub async fn append_movements(
    State(state): State<AppState>,
    Path(item_id): Path<ItemId>,
    payload: Result<Json<MovementsPayload>, JsonRejection>,
) -> HandlerResult<ItemInfo> {
    let Json(request) = payload?;
    let info =
        db_services::append_movements(state.repository.as_ref(), item_id, request.movements)
            .await?;
    Ok(Json(info))
}

// =============================================================================
// Flow Series
// =============================================================================

/// GET /v1/items/{item_id}/flow-series
pub async fn get_item_flow_series(
    State(state): State<AppState>,
    Path(item_id): Path<ItemId>,
    Query(query): Query<FlowSeriesQuery>,
) -> HandlerResult<FlowSeriesResponse> {
    let options = query
        .to_options(&state.chart.base_options())
        .map_err(AppError::BadRequest)?;
    let result =
        db_services::get_item_flow_series(state.repository.as_ref(), item_id, &options).await?;
    Ok(Json(FlowSeriesResponse::new(result, query.chart)))
}

/// POST /v1/flow-series
///
/// Stateless computation over movements supplied in the body.
pub async fn compute_flow_series(
    State(state): State<AppState>,
    payload: Result<Json<ComputeFlowSeriesRequest>, JsonRejection>,
) -> HandlerResult<FlowSeriesResponse> {
    let Json(request) = payload?;
    let base = state.chart.base_options();
    let options = request
        .options
        .map(|options| options.or(&base))
        .unwrap_or(base);
    let result = run_engine(&request.movements, &options);
    Ok(Json(FlowSeriesResponse::new(result, request.chart)))
}
