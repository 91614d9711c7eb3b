use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::ImageMeta;

/// Trade side. Closed enum rather than a bare string so a typo cannot
/// produce a third position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "trade_position", rename_all = "UPPERCASE")]
pub enum Position {
    Buy,
    Sell,
}

impl Position {
    pub fn is_buy(self) -> bool {
        self == Position::Buy
    }

    pub fn is_sell(self) -> bool {
        self == Position::Sell
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: Uuid,
    pub user_id: Uuid,
    pub trade_date: NaiveDate,
    pub ticker: String,
    pub position: Position,
    pub quantity: BigDecimal,
    pub entry_price: BigDecimal,
    pub exit_price: Option<BigDecimal>,
    // Non-null only for SELL trades with a recorded realized result.
    pub profit: Option<BigDecimal>,
    pub reason: Option<String>,
    pub retrospective: Option<String>,
    pub rating: Option<i32>,
    pub retrospective_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrade {
    pub trade_date: NaiveDate,
    pub ticker: String,
    pub position: Position,
    pub quantity: BigDecimal,
    pub entry_price: BigDecimal,
    pub exit_price: Option<BigDecimal>,
    pub profit: Option<BigDecimal>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRetrospective {
    pub content: Option<String>,
    pub rating: Option<i32>,
}

/// Trade plus its attached image metadata, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    #[serde(flatten)]
    pub trade: Trade,
    pub images: Vec<ImageMeta>,
}

/// Aggregate performance over one user's trades in a period window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStats {
    pub total_trades: i64,
    pub buy_count: i64,
    pub sell_count: i64,
    pub win_count: i64,
    pub loss_count: i64,
    pub win_rate: f64,
    pub total_profit: BigDecimal,
    pub average_profit: BigDecimal,
    pub best_trade: BigDecimal,
    pub worst_trade: BigDecimal,
}
