use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{CreateJournal, JournalResponse, Page};
use crate::routes::default_size;
use crate::services::journal_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_journals).post(create_journal))
        .route(
            "/:id",
            get(get_journal).put(update_journal).delete(delete_journal),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalListParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

pub async fn list_journals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<JournalListParams>,
) -> Result<Json<Page<JournalResponse>>, AppError> {
    info!("GET /journals - Listing journals for {}", user_id);
    let page = journal_service::list(
        &state.pool,
        user_id,
        params.start_date,
        params.end_date,
        params.page,
        params.size,
    )
    .await
    .map_err(|e| {
        error!("Failed to list journals for {}: {}", user_id, e);
        e
    })?;
    Ok(Json(page))
}

pub async fn get_journal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JournalResponse>, AppError> {
    info!("GET /journals/{} - Getting journal", id);
    let journal = journal_service::get(&state.pool, user_id, id).await?;
    Ok(Json(journal))
}

pub async fn create_journal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<CreateJournal>,
) -> Result<(StatusCode, Json<JournalResponse>), AppError> {
    info!("POST /journals - Creating journal for {}", user_id);
    let journal = journal_service::create(&state.pool, &state.cache, user_id, input)
        .await
        .map_err(|e| {
            error!("Failed to create journal for {}: {}", user_id, e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(journal)))
}

pub async fn update_journal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateJournal>,
) -> Result<Json<JournalResponse>, AppError> {
    info!("PUT /journals/{} - Updating journal", id);
    let journal = journal_service::update(&state.pool, &state.cache, user_id, id, input)
        .await
        .map_err(|e| {
            error!("Failed to update journal {}: {}", id, e);
            e
        })?;
    Ok(Json(journal))
}

pub async fn delete_journal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /journals/{} - Deleting journal", id);
    journal_service::delete(&state.pool, &state.cache, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
