use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{CreateTrade, Page, Position, TradeResponse, TradeStats, UpdateRetrospective};
use crate::routes::default_size;
use crate::services::stats::StatsPeriod;
use crate::services::trade_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trades).post(create_trade))
        .route("/bulk", post(bulk_create_trades))
        .route("/stats", get(trade_stats))
        .route("/:id", get(get_trade).put(update_trade).delete(delete_trade))
        .route(
            "/:id/retrospective",
            put(update_retrospective).delete(delete_retrospective),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeListParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub ticker: Option<String>,
    pub position: Option<Position>,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    #[serde(default)]
    pub period: StatsPeriod,
}

pub async fn list_trades(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<TradeListParams>,
) -> Result<Json<Page<TradeResponse>>, AppError> {
    info!("GET /trades - Listing trades for {}", user_id);
    let page = trade_service::list(
        &state.pool,
        user_id,
        params.start_date,
        params.end_date,
        params.ticker,
        params.position,
        params.page,
        params.size,
    )
    .await
    .map_err(|e| {
        error!("Failed to list trades for {}: {}", user_id, e);
        e
    })?;
    Ok(Json(page))
}

pub async fn get_trade(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TradeResponse>, AppError> {
    info!("GET /trades/{} - Getting trade", id);
    let trade = trade_service::get(&state.pool, user_id, id).await?;
    Ok(Json(trade))
}

pub async fn create_trade(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<CreateTrade>,
) -> Result<(StatusCode, Json<TradeResponse>), AppError> {
    info!("POST /trades - Creating trade for {}", user_id);
    let trade = trade_service::create(&state.pool, &state.cache, user_id, input)
        .await
        .map_err(|e| {
            error!("Failed to create trade for {}: {}", user_id, e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(trade)))
}

pub async fn bulk_create_trades(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(inputs): Json<Vec<CreateTrade>>,
) -> Result<(StatusCode, Json<Vec<TradeResponse>>), AppError> {
    info!("POST /trades/bulk - Creating {} trades for {}", inputs.len(), user_id);
    let trades = trade_service::bulk_create(&state.pool, &state.cache, user_id, inputs)
        .await
        .map_err(|e| {
            error!("Failed to bulk-create trades for {}: {}", user_id, e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(trades)))
}

pub async fn update_trade(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateTrade>,
) -> Result<Json<TradeResponse>, AppError> {
    info!("PUT /trades/{} - Updating trade", id);
    let trade = trade_service::update(&state.pool, &state.cache, user_id, id, input)
        .await
        .map_err(|e| {
            error!("Failed to update trade {}: {}", id, e);
            e
        })?;
    Ok(Json(trade))
}

pub async fn delete_trade(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /trades/{} - Deleting trade", id);
    trade_service::delete(&state.pool, &state.cache, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn trade_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<StatsParams>,
) -> Result<Json<TradeStats>, AppError> {
    info!("GET /trades/stats - Computing {:?} stats for {}", params.period, user_id);
    let stats = trade_service::stats(&state.pool, &state.cache, user_id, params.period)
        .await
        .map_err(|e| {
            error!("Failed to compute stats for {}: {}", user_id, e);
            e
        })?;
    Ok(Json(stats))
}

pub async fn update_retrospective(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateRetrospective>,
) -> Result<Json<TradeResponse>, AppError> {
    info!("PUT /trades/{}/retrospective - Updating retrospective", id);
    let trade =
        trade_service::update_retrospective(&state.pool, &state.cache, user_id, id, input).await?;
    Ok(Json(trade))
}

pub async fn delete_retrospective(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /trades/{}/retrospective - Clearing retrospective", id);
    trade_service::delete_retrospective(&state.pool, &state.cache, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
