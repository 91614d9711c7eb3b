use bigdecimal::{BigDecimal, Zero};
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateTrade, Page, Position, Trade, TradeResponse, TradeStats, UpdateRetrospective};
use crate::services::cache::{CacheKey, ResponseCache};
use crate::services::{image_service, stats, validate_page};

fn validate(input: &CreateTrade) -> Result<(), AppError> {
    if input.ticker.trim().is_empty() {
        return Err(AppError::Validation("Ticker cannot be empty".into()));
    }
    if input.ticker.trim().len() > 10 {
        return Err(AppError::Validation("Ticker must be at most 10 characters".into()));
    }
    if input.quantity <= BigDecimal::zero() {
        return Err(AppError::Validation("Quantity must be > 0".into()));
    }
    if input.entry_price <= BigDecimal::zero() {
        return Err(AppError::Validation("Entry price must be > 0".into()));
    }
    Ok(())
}

fn normalize(mut input: CreateTrade) -> CreateTrade {
    input.ticker = input.ticker.trim().to_uppercase();
    input
}

/// Profit is only ever persisted for SELL trades; a BUY keeps it null no
/// matter what the request carried.
fn realized_profit(input: &CreateTrade) -> Option<&BigDecimal> {
    if input.position.is_sell() {
        input.profit.as_ref()
    } else {
        None
    }
}

async fn owned_trade(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Trade, AppError> {
    let trade = db::trade_queries::fetch_one(pool, id)
        .await?
        .ok_or(AppError::NotFound("Trade"))?;
    if trade.user_id != user_id {
        return Err(AppError::Forbidden("Not the owner of this trade"));
    }
    Ok(trade)
}

async fn attach_images(pool: &PgPool, trades: Vec<Trade>) -> Result<Vec<TradeResponse>, AppError> {
    let ids: Vec<Uuid> = trades.iter().map(|t| t.id).collect();
    let mut images = image_service::metas_by_trade_ids(pool, &ids).await?;
    Ok(trades
        .into_iter()
        .map(|t| TradeResponse {
            images: images.remove(&t.id).unwrap_or_default(),
            trade: t,
        })
        .collect())
}

#[allow(clippy::too_many_arguments)]
pub async fn list(
    pool: &PgPool,
    user_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    ticker: Option<String>,
    position: Option<Position>,
    page: i64,
    size: i64,
) -> Result<Page<TradeResponse>, AppError> {
    validate_page(page, size)?;
    let ticker = ticker.map(|t| t.trim().to_uppercase());
    let trades = db::trade_queries::fetch_filtered(
        pool,
        user_id,
        start_date,
        end_date,
        ticker.as_deref(),
        position,
        size,
        page * size,
    )
    .await?;
    let total = db::trade_queries::count_filtered(
        pool,
        user_id,
        start_date,
        end_date,
        ticker.as_deref(),
        position,
    )
    .await?;
    let content = attach_images(pool, trades).await?;
    Ok(Page::new(content, total, page, size))
}

pub async fn get(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<TradeResponse, AppError> {
    let trade = owned_trade(pool, user_id, id).await?;
    let mut responses = attach_images(pool, vec![trade]).await?;
    Ok(responses.remove(0))
}

pub async fn create(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    input: CreateTrade,
) -> Result<TradeResponse, AppError> {
    validate(&input)?;
    let input = normalize(input);
    let trade = db::trade_queries::create(pool, user_id, &input, realized_profit(&input)).await?;
    cache.flush_all();
    Ok(TradeResponse {
        trade,
        images: Vec::new(),
    })
}

/// Every row is checked before anything is written, so one bad entry rejects
/// the request without side effects.
fn prepare_batch(inputs: Vec<CreateTrade>) -> Result<Vec<CreateTrade>, AppError> {
    for input in &inputs {
        validate(input)?;
    }
    Ok(inputs.into_iter().map(normalize).collect())
}

/// The batch is inserted inside one transaction: either every trade lands or
/// none do, even if an insert fails partway through.
pub async fn bulk_create(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    inputs: Vec<CreateTrade>,
) -> Result<Vec<TradeResponse>, AppError> {
    let inputs = prepare_batch(inputs)?;
    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(inputs.len());
    for input in inputs {
        let trade =
            db::trade_queries::create(&mut *tx, user_id, &input, realized_profit(&input)).await?;
        created.push(TradeResponse {
            trade,
            images: Vec::new(),
        });
    }
    tx.commit().await?;
    cache.flush_all();
    Ok(created)
}

pub async fn update(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    id: Uuid,
    input: CreateTrade,
) -> Result<TradeResponse, AppError> {
    validate(&input)?;
    owned_trade(pool, user_id, id).await?;
    let input = normalize(input);
    let trade = db::trade_queries::update(pool, id, &input, realized_profit(&input))
        .await?
        .ok_or(AppError::NotFound("Trade"))?;
    cache.flush_all();
    let mut responses = attach_images(pool, vec![trade]).await?;
    Ok(responses.remove(0))
}

pub async fn delete(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    owned_trade(pool, user_id, id).await?;
    // Image rows and the trade go together or not at all.
    let mut tx = pool.begin().await?;
    db::image_queries::delete_for_trade(&mut *tx, id).await?;
    db::trade_queries::delete(&mut *tx, id).await?;
    tx.commit().await?;
    cache.flush_all();
    Ok(())
}

pub async fn update_retrospective(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    id: Uuid,
    input: UpdateRetrospective,
) -> Result<TradeResponse, AppError> {
    if let Some(rating) = input.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation("Rating must be between 1 and 5".into()));
        }
    }
    owned_trade(pool, user_id, id).await?;
    let trade =
        db::trade_queries::update_retrospective(pool, id, input.content.as_deref(), input.rating, false)
            .await?
            .ok_or(AppError::NotFound("Trade"))?;
    cache.flush_all();
    let mut responses = attach_images(pool, vec![trade]).await?;
    Ok(responses.remove(0))
}

pub async fn delete_retrospective(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    owned_trade(pool, user_id, id).await?;
    db::trade_queries::update_retrospective(pool, id, None, None, true)
        .await?
        .ok_or(AppError::NotFound("Trade"))?;
    cache.flush_all();
    Ok(())
}

/// Aggregate performance for the caller's own trades over a named period.
/// Cached per (user, period); correctness never depends on the cache being
/// warm, every miss recomputes from a fresh snapshot.
pub async fn stats(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    period: stats::StatsPeriod,
) -> Result<TradeStats, AppError> {
    let key = CacheKey::new("trade_stats", user_id, format!("{period:?}"));
    if let Some(hit) = cache.get::<TradeStats>(&key) {
        return Ok(hit);
    }

    let (start, end) = match period.date_range(Utc::now().date_naive()) {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    };
    let trades = db::trade_queries::fetch_in_range(pool, user_id, start, end).await?;
    let computed = stats::compute(&trades);
    cache.put(key, &computed);
    Ok(computed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn input(position: Position, profit: Option<&str>) -> CreateTrade {
        CreateTrade {
            trade_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            ticker: " aapl ".into(),
            position,
            quantity: "10".parse().unwrap(),
            entry_price: "189.50".parse().unwrap(),
            exit_price: None,
            profit: profit.map(|p| p.parse().unwrap()),
            reason: None,
        }
    }

    #[test]
    fn test_normalize_uppercases_and_trims_ticker() {
        let normalized = normalize(input(Position::Buy, None));
        assert_eq!(normalized.ticker, "AAPL");
    }

    #[test]
    fn test_buy_never_keeps_profit() {
        let buy = input(Position::Buy, Some("12.00"));
        assert!(realized_profit(&buy).is_none());
        let sell = input(Position::Sell, Some("12.00"));
        assert_eq!(realized_profit(&sell), Some(&"12.00".parse().unwrap()));
    }

    #[test]
    fn test_validate_rejects_non_positive_quantity() {
        let mut bad = input(Position::Buy, None);
        bad.quantity = "0".parse().unwrap();
        assert!(matches!(validate(&bad), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_ticker() {
        let mut bad = input(Position::Buy, None);
        bad.ticker = "   ".into();
        assert!(matches!(validate(&bad), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_one_bad_row_rejects_the_whole_batch() {
        let mut bad = input(Position::Buy, None);
        bad.quantity = "-1".parse().unwrap();
        let batch = vec![input(Position::Sell, Some("5.00")), bad, input(Position::Buy, None)];
        assert!(matches!(prepare_batch(batch), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_prepare_batch_normalizes_every_row() {
        let batch =
            prepare_batch(vec![input(Position::Buy, None), input(Position::Sell, None)]).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|t| t.ticker == "AAPL"));
    }
}
