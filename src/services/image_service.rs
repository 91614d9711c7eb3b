use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{ImageMeta, ImageMetaRow};

fn group(rows: Vec<ImageMetaRow>) -> HashMap<Uuid, Vec<ImageMeta>> {
    let mut map: HashMap<Uuid, Vec<ImageMeta>> = HashMap::new();
    for row in rows {
        map.entry(row.parent_id).or_default().push(row.into());
    }
    map
}

/// Image metadata for a batch of trades, grouped by trade id. Trades without
/// images are simply absent from the map.
pub async fn metas_by_trade_ids(
    pool: &PgPool,
    trade_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<ImageMeta>>, AppError> {
    if trade_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = db::image_queries::fetch_for_trades(pool, trade_ids).await?;
    Ok(group(rows))
}

pub async fn metas_by_journal_ids(
    pool: &PgPool,
    journal_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<ImageMeta>>, AppError> {
    if journal_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = db::image_queries::fetch_for_journals(pool, journal_ids).await?;
    Ok(group(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_group_collects_rows_per_parent() {
        let parent_a = Uuid::new_v4();
        let parent_b = Uuid::new_v4();
        let row = |parent_id: Uuid, name: &str| ImageMetaRow {
            parent_id,
            id: Uuid::new_v4(),
            file_name: name.into(),
            content_type: "image/png".into(),
            size_bytes: 1024,
            created_at: Utc::now(),
        };
        let map = group(vec![
            row(parent_a, "a1.png"),
            row(parent_b, "b1.png"),
            row(parent_a, "a2.png"),
        ]);
        assert_eq!(map[&parent_a].len(), 2);
        assert_eq!(map[&parent_b].len(), 1);
        assert_eq!(map[&parent_a][0].file_name, "a1.png");
    }
}
