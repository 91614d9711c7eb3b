use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{feed, follows, health, journals, stocks, trades, users};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/v1/trades", trades::router())
        .nest("/api/v1/journals", journals::router())
        .nest("/api/v1/follows", follows::router())
        .nest("/api/v1/stocks", stocks::router())
        .nest("/api/v1/users", users::router())
        .nest("/api/v1/feed", feed::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
