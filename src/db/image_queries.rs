use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ImageMetaRow;

pub async fn fetch_for_trades(
    pool: &PgPool,
    trade_ids: &[Uuid],
) -> Result<Vec<ImageMetaRow>, sqlx::Error> {
    sqlx::query_as::<_, ImageMetaRow>(
        "SELECT trade_id AS parent_id, id, file_name, content_type, size_bytes, created_at
         FROM trade_images
         WHERE trade_id = ANY($1)
         ORDER BY created_at",
    )
    .bind(trade_ids)
    .fetch_all(pool)
    .await
}

pub async fn fetch_for_journals(
    pool: &PgPool,
    journal_ids: &[Uuid],
) -> Result<Vec<ImageMetaRow>, sqlx::Error> {
    sqlx::query_as::<_, ImageMetaRow>(
        "SELECT journal_id AS parent_id, id, file_name, content_type, size_bytes, created_at
         FROM journal_images
         WHERE journal_id = ANY($1)
         ORDER BY created_at",
    )
    .bind(journal_ids)
    .fetch_all(pool)
    .await
}

pub async fn delete_for_trade(
    executor: impl sqlx::PgExecutor<'_>,
    trade_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM trade_images WHERE trade_id = $1")
        .bind(trade_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_for_journal(
    executor: impl sqlx::PgExecutor<'_>,
    journal_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM journal_images WHERE journal_id = $1")
        .bind(journal_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
