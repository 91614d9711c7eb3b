use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{
    JournalResponse, Page, TradeResponse, UpdateProfile, UserProfile, UserSearchResult,
};
use crate::routes::{default_size, PageParams};
use crate::services::user_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/me/profile", put(update_profile))
        .route("/:target_id/profile", get(profile))
        .route("/:target_id/journals", get(user_journals))
        .route("/:target_id/trades", get(user_trades))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

pub async fn search(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Page<UserSearchResult>>, AppError> {
    info!("GET /users/search - q={:?}", params.q);
    let page = user_service::search(&state.pool, &params.q, params.page, params.size).await?;
    Ok(Json(page))
}

pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    info!("GET /users/{}/profile", target_id);
    let profile = user_service::profile(&state.pool, &state.cache, user_id, target_id)
        .await
        .map_err(|e| {
            error!("Failed to load profile {}: {}", target_id, e);
            e
        })?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<UpdateProfile>,
) -> Result<StatusCode, AppError> {
    info!("PUT /users/me/profile - Updating profile for {}", user_id);
    user_service::update_profile(&state.pool, &state.cache, user_id, input).await?;
    Ok(StatusCode::OK)
}

pub async fn user_journals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<JournalResponse>>, AppError> {
    info!("GET /users/{}/journals - viewer {}", target_id, user_id);
    let page =
        user_service::user_journals(&state.pool, user_id, target_id, params.page, params.size)
            .await?;
    Ok(Json(page))
}

pub async fn user_trades(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<TradeResponse>>, AppError> {
    info!("GET /users/{}/trades - viewer {}", target_id, user_id);
    let page = user_service::user_trades(&state.pool, user_id, target_id, params.page, params.size)
        .await?;
    Ok(Json(page))
}
