use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateJournal, Journal};

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    input: &CreateJournal,
) -> Result<Journal, sqlx::Error> {
    sqlx::query_as::<_, Journal>(
        "INSERT INTO journals (id, user_id, title, content, journal_date)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, user_id, title, content, journal_date, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&input.title)
    .bind(&input.content)
    .bind(input.journal_date)
    .fetch_one(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Journal>, sqlx::Error> {
    sqlx::query_as::<_, Journal>(
        "SELECT id, user_id, title, content, journal_date, created_at, updated_at
         FROM journals WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    content: &str,
) -> Result<Option<Journal>, sqlx::Error> {
    sqlx::query_as::<_, Journal>(
        "UPDATE journals
         SET title = $2, content = $3, updated_at = NOW()
         WHERE id = $1
         RETURNING id, user_id, title, content, journal_date, created_at, updated_at",
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await
}

pub async fn delete(executor: impl sqlx::PgExecutor<'_>, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM journals WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// One owner's journals inside an optional journal-date window, most recent
/// journal date first.
pub async fn fetch_filtered(
    pool: &PgPool,
    user_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Journal>, sqlx::Error> {
    sqlx::query_as::<_, Journal>(
        "SELECT id, user_id, title, content, journal_date, created_at, updated_at
         FROM journals
         WHERE user_id = $1
           AND ($2::date IS NULL OR journal_date >= $2)
           AND ($3::date IS NULL OR journal_date <= $3)
         ORDER BY journal_date DESC, created_at DESC
         LIMIT $4 OFFSET $5",
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_filtered(
    pool: &PgPool,
    user_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM journals
         WHERE user_id = $1
           AND ($2::date IS NULL OR journal_date >= $2)
           AND ($3::date IS NULL OR journal_date <= $3)",
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await
}

/// Most recently created journals authored by any of the given owners.
pub async fn fetch_recent_by_owners(
    pool: &PgPool,
    owner_ids: &[Uuid],
    limit: i64,
) -> Result<Vec<Journal>, sqlx::Error> {
    sqlx::query_as::<_, Journal>(
        "SELECT id, user_id, title, content, journal_date, created_at, updated_at
         FROM journals
         WHERE user_id = ANY($1)
         ORDER BY created_at DESC
         LIMIT $2",
    )
    .bind(owner_ids)
    .bind(limit)
    .fetch_all(pool)
    .await
}
