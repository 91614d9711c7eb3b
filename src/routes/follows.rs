use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{FollowStatus, FollowUser, Page};
use crate::routes::PageParams;
use crate::services::follow_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:target_id", axum::routing::post(follow).delete(unfollow))
        .route("/:target_id/status", get(status))
        .route("/:target_id/followers", get(followers))
        .route("/:target_id/following", get(following))
}

pub async fn follow(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("POST /follows/{} - {} follows", target_id, user_id);
    follow_service::follow(&state.pool, &state.cache, user_id, target_id)
        .await
        .map_err(|e| {
            error!("Failed to follow {} -> {}: {}", user_id, target_id, e);
            e
        })?;
    Ok(StatusCode::CREATED)
}

pub async fn unfollow(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /follows/{} - {} unfollows", target_id, user_id);
    follow_service::unfollow(&state.pool, &state.cache, user_id, target_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn status(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
) -> Result<Json<FollowStatus>, AppError> {
    let status = follow_service::status(&state.pool, user_id, target_id).await?;
    Ok(Json(status))
}

pub async fn followers(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<FollowUser>>, AppError> {
    info!("GET /follows/{}/followers", target_id);
    let page =
        follow_service::followers(&state.pool, target_id, user_id, params.page, params.size)
            .await?;
    Ok(Json(page))
}

pub async fn following(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<FollowUser>>, AppError> {
    info!("GET /follows/{}/following", target_id);
    let page =
        follow_service::following(&state.pool, target_id, user_id, params.page, params.size)
            .await?;
    Ok(Json(page))
}
