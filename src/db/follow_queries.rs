use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Follow;

pub async fn exists(pool: &PgPool, follower_id: Uuid, following_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await
}

pub async fn following_ids(pool: &PgPool, follower_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT following_id FROM follows WHERE follower_id = $1")
        .bind(follower_id)
        .fetch_all(pool)
        .await
}

pub async fn count_followers(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follows WHERE following_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn count_following(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn create(pool: &PgPool, follower_id: Uuid, following_id: Uuid) -> Result<Follow, sqlx::Error> {
    sqlx::query_as::<_, Follow>(
        "INSERT INTO follows (id, follower_id, following_id)
         VALUES ($1, $2, $3)
         RETURNING id, follower_id, following_id, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, follower_id: Uuid, following_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
        .bind(follower_id)
        .bind(following_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Page of edges pointing at `following_id` (who follows this user).
pub async fn fetch_followers(
    pool: &PgPool,
    following_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Follow>, sqlx::Error> {
    sqlx::query_as::<_, Follow>(
        "SELECT id, follower_id, following_id, created_at
         FROM follows
         WHERE following_id = $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(following_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Page of edges originating from `follower_id` (who this user follows).
pub async fn fetch_following(
    pool: &PgPool,
    follower_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Follow>, sqlx::Error> {
    sqlx::query_as::<_, Follow>(
        "SELECT id, follower_id, following_id, created_at
         FROM follows
         WHERE follower_id = $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(follower_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
