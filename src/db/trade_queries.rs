use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateTrade, Position, Trade};

const TRADE_COLUMNS: &str = "id, user_id, trade_date, ticker, position, quantity, entry_price, \
     exit_price, profit, reason, retrospective, rating, retrospective_updated_at, \
     created_at, updated_at";

pub async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    user_id: Uuid,
    input: &CreateTrade,
    profit: Option<&bigdecimal::BigDecimal>,
) -> Result<Trade, sqlx::Error> {
    sqlx::query_as::<_, Trade>(&format!(
        "INSERT INTO trades (id, user_id, trade_date, ticker, position, quantity, entry_price, \
                             exit_price, profit, reason)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING {TRADE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(input.trade_date)
    .bind(&input.ticker)
    .bind(input.position)
    .bind(&input.quantity)
    .bind(&input.entry_price)
    .bind(input.exit_price.as_ref())
    .bind(profit)
    .bind(input.reason.as_deref())
    .fetch_one(executor)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Trade>, sqlx::Error> {
    sqlx::query_as::<_, Trade>(&format!(
        "SELECT {TRADE_COLUMNS} FROM trades WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &CreateTrade,
    profit: Option<&bigdecimal::BigDecimal>,
) -> Result<Option<Trade>, sqlx::Error> {
    sqlx::query_as::<_, Trade>(&format!(
        "UPDATE trades
         SET trade_date = $2, ticker = $3, position = $4, quantity = $5, entry_price = $6,
             exit_price = $7, profit = $8, reason = $9, updated_at = NOW()
         WHERE id = $1
         RETURNING {TRADE_COLUMNS}"
    ))
    .bind(id)
    .bind(input.trade_date)
    .bind(&input.ticker)
    .bind(input.position)
    .bind(&input.quantity)
    .bind(&input.entry_price)
    .bind(input.exit_price.as_ref())
    .bind(profit)
    .bind(input.reason.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn update_retrospective(
    pool: &PgPool,
    id: Uuid,
    content: Option<&str>,
    rating: Option<i32>,
    clear: bool,
) -> Result<Option<Trade>, sqlx::Error> {
    sqlx::query_as::<_, Trade>(&format!(
        "UPDATE trades
         SET retrospective = $2, rating = $3,
             retrospective_updated_at = CASE WHEN $4 THEN NULL ELSE NOW() END,
             updated_at = NOW()
         WHERE id = $1
         RETURNING {TRADE_COLUMNS}"
    ))
    .bind(id)
    .bind(content)
    .bind(rating)
    .bind(clear)
    .fetch_optional(pool)
    .await
}

pub async fn delete(executor: impl sqlx::PgExecutor<'_>, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM trades WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Filtered, offset-paginated listing for one owner, newest trade date first.
#[allow(clippy::too_many_arguments)]
pub async fn fetch_filtered(
    pool: &PgPool,
    user_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    ticker: Option<&str>,
    position: Option<Position>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Trade>, sqlx::Error> {
    sqlx::query_as::<_, Trade>(&format!(
        "SELECT {TRADE_COLUMNS} FROM trades
         WHERE user_id = $1
           AND ($2::date IS NULL OR trade_date >= $2)
           AND ($3::date IS NULL OR trade_date <= $3)
           AND ($4::text IS NULL OR ticker = $4)
           AND ($5::trade_position IS NULL OR position = $5)
         ORDER BY trade_date DESC, created_at DESC
         LIMIT $6 OFFSET $7"
    ))
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(ticker)
    .bind(position)
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
    ticker: Option<&str>,
    position: Option<Position>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM trades
         WHERE user_id = $1
           AND ($2::date IS NULL OR trade_date >= $2)
           AND ($3::date IS NULL OR trade_date <= $3)
           AND ($4::text IS NULL OR ticker = $4)
           AND ($5::trade_position IS NULL OR position = $5)",
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(ticker)
    .bind(position)
    .fetch_one(pool)
    .await
}

/// All of one owner's trades inside an optional trade-date window. Feeds the
/// statistics engine, so no pagination.
pub async fn fetch_in_range(
    pool: &PgPool,
    user_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<Trade>, sqlx::Error> {
    sqlx::query_as::<_, Trade>(&format!(
        "SELECT {TRADE_COLUMNS} FROM trades
         WHERE user_id = $1
           AND ($2::date IS NULL OR trade_date >= $2)
           AND ($3::date IS NULL OR trade_date <= $3)"
    ))
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await
}

/// Most recently created trades authored by any of the given owners.
pub async fn fetch_recent_by_owners(
    pool: &PgPool,
    owner_ids: &[Uuid],
    limit: i64,
) -> Result<Vec<Trade>, sqlx::Error> {
    sqlx::query_as::<_, Trade>(&format!(
        "SELECT {TRADE_COLUMNS} FROM trades
         WHERE user_id = ANY($1)
         ORDER BY created_at DESC
         LIMIT $2"
    ))
    .bind(owner_ids)
    .bind(limit)
    .fetch_all(pool)
    .await
}
