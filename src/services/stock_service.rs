use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::StockSearchResult;
use crate::services::cache::{CacheKey, ResponseCache};

const SEARCH_LIMIT: i64 = 10;

/// A blank query resolves to nothing; anything else is trimmed before it
/// reaches the catalog.
fn normalize_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Symbol lookup over the shared stock catalog, capped at ten results. The
/// catalog is viewer-independent, so cache entries are keyed under the nil
/// user id.
pub async fn search(
    pool: &PgPool,
    cache: &ResponseCache,
    query: &str,
) -> Result<Vec<StockSearchResult>, AppError> {
    let Some(query) = normalize_query(query) else {
        return Ok(Vec::new());
    };

    let key = CacheKey::new("stock_search", Uuid::nil(), query);
    if let Some(hit) = cache.get::<Vec<StockSearchResult>>(&key) {
        return Ok(hit);
    }

    let results: Vec<StockSearchResult> = db::stock_queries::search(pool, query, SEARCH_LIMIT)
        .await?
        .into_iter()
        .map(StockSearchResult::from)
        .collect();
    cache.put(key, &results);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_resolves_to_nothing() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("   "), None);
    }

    #[test]
    fn test_query_is_trimmed() {
        assert_eq!(normalize_query("  aapl "), Some("aapl"));
        assert_eq!(normalize_query("MSFT"), Some("MSFT"));
    }
}
