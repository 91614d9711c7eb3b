use sqlx::PgPool;

use crate::services::cache::ResponseCache;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub cache: ResponseCache,
}
