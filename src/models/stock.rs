use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the shared stock symbol catalog.
#[derive(Debug, Clone, FromRow)]
pub struct Stock {
    pub id: Uuid,
    pub ticker: String,
    pub name_en: String,
    pub name_ko: Option<String>,
    pub logo_url: Option<String>,
}

// Serialize and Deserialize both, so search results can round-trip through
// the response cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSearchResult {
    pub ticker: String,
    pub name_en: String,
    pub name_ko: Option<String>,
    pub logo_url: Option<String>,
}

impl From<Stock> for StockSearchResult {
    fn from(stock: Stock) -> Self {
        Self {
            ticker: stock.ticker,
            name_en: stock.name_en,
            name_ko: stock.name_ko,
            logo_url: stock.logo_url,
        }
    }
}
