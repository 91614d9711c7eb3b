use sqlx::PgPool;

use crate::models::Stock;

/// Substring match over the ticker and both names. Exact ticker matches rank
/// first, then ticker prefixes, then everything else, alphabetically within
/// each band.
pub async fn search(pool: &PgPool, query: &str, limit: i64) -> Result<Vec<Stock>, sqlx::Error> {
    sqlx::query_as::<_, Stock>(
        "SELECT id, ticker, name_en, name_ko, logo_url
         FROM stocks
         WHERE ticker ILIKE '%' || $1 || '%'
            OR name_en ILIKE '%' || $1 || '%'
            OR name_ko LIKE '%' || $1 || '%'
         ORDER BY
           CASE WHEN UPPER(ticker) = UPPER($1) THEN 0
                WHEN ticker ILIKE $1 || '%' THEN 1
                ELSE 2 END,
           ticker
         LIMIT $2",
    )
    .bind(query)
    .bind(limit)
    .fetch_all(pool)
    .await
}
