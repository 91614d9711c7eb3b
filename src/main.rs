mod app;
mod auth;
mod db;
mod errors;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::logging::LoggingConfig;
use crate::services::cache::ResponseCache;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        pool,
        cache: ResponseCache::new(),
    };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Tradediary backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
