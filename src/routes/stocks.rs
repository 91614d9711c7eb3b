use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::StockSearchResult;
use crate::services::stock_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search_stocks))
}

#[derive(Debug, Deserialize)]
pub struct StockSearchParams {
    pub q: String,
}

pub async fn search_stocks(
    State(state): State<AppState>,
    Query(params): Query<StockSearchParams>,
) -> Result<Json<Vec<StockSearchResult>>, AppError> {
    info!("GET /stocks/search - Searching symbols for {:?}", params.q);
    let results = stock_service::search(&state.pool, &state.cache, &params.q)
        .await
        .map_err(|e| {
            error!("Failed to search stocks: {}", e);
            e
        })?;
    Ok(Json(results))
}
