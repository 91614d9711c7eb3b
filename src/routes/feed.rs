use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{FeedItem, Page};
use crate::routes::PageParams;
use crate::services::feed_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(feed))
}

pub async fn feed(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<FeedItem>>, AppError> {
    info!("GET /feed - Building feed for {}", user_id);
    let page = feed_service::build_feed(&state.pool, user_id, params.page, params.size)
        .await
        .map_err(|e| {
            error!("Failed to build feed for {}: {}", user_id, e);
            e
        })?;
    Ok(Json(page))
}
