use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, nickname, bio, created_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Batch lookup used to resolve authors for the feed and follow listings.
pub async fn fetch_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, nickname, bio, created_at FROM users WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub async fn search_by_nickname(
    pool: &PgPool,
    query: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, nickname, bio, created_at
         FROM users
         WHERE nickname ILIKE '%' || $1 || '%'
         ORDER BY nickname
         LIMIT $2 OFFSET $3",
    )
    .bind(query)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_by_nickname(pool: &PgPool, query: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM users WHERE nickname ILIKE '%' || $1 || '%'",
    )
    .bind(query)
    .fetch_one(pool)
    .await
}

pub async fn update_bio(pool: &PgPool, id: Uuid, bio: Option<&str>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET bio = $2 WHERE id = $1")
        .bind(id)
        .bind(bio)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
