use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{
    AuthorSummary, FeedItem, ImageMeta, Journal, JournalResponse, Page, Trade, TradeResponse,
};
use crate::services::{follow_service, image_service, validate_page};

/// Merged activity timeline of every user the viewer follows.
///
/// Both streams are over-fetched at twice the page size before merging; the
/// resulting totals are therefore only accurate within that window. That is
/// the contract the clients were built against, kept deliberately over a
/// cursor-based merge.
pub async fn build_feed(
    pool: &PgPool,
    viewer_id: Uuid,
    page: i64,
    size: i64,
) -> Result<Page<FeedItem>, AppError> {
    validate_page(page, size)?;

    let following = follow_service::following_ids(pool, viewer_id).await?;
    if following.is_empty() {
        // Nothing to merge, and no reason to touch the stores.
        return Ok(Page::empty(page, size));
    }

    let fetch_size = size * 2;
    let journals =
        db::journal_queries::fetch_recent_by_owners(pool, &following, fetch_size).await?;
    let trades = db::trade_queries::fetch_recent_by_owners(pool, &following, fetch_size).await?;

    let author_ids: Vec<Uuid> = journals
        .iter()
        .map(|j| j.user_id)
        .chain(trades.iter().map(|t| t.user_id))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let authors: HashMap<Uuid, AuthorSummary> = db::user_queries::fetch_by_ids(pool, &author_ids)
        .await?
        .iter()
        .map(|u| (u.id, AuthorSummary::from(u)))
        .collect();

    let journal_ids: Vec<Uuid> = journals.iter().map(|j| j.id).collect();
    let trade_ids: Vec<Uuid> = trades.iter().map(|t| t.id).collect();
    let journal_images = image_service::metas_by_journal_ids(pool, &journal_ids).await?;
    let trade_images = image_service::metas_by_trade_ids(pool, &trade_ids).await?;

    let items = assemble(journals, trades, &authors, journal_images, trade_images);
    Ok(Page::from_vec(items, page, size))
}

/// Merge the two fetched streams into one ranked list. Items whose author
/// has disappeared since the fetch are dropped rather than failing the page.
/// Ordering: creation timestamp descending, item id descending on ties, so
/// identical requests paginate identically.
fn assemble(
    journals: Vec<Journal>,
    trades: Vec<Trade>,
    authors: &HashMap<Uuid, AuthorSummary>,
    mut journal_images: HashMap<Uuid, Vec<ImageMeta>>,
    mut trade_images: HashMap<Uuid, Vec<ImageMeta>>,
) -> Vec<FeedItem> {
    let mut items = Vec::with_capacity(journals.len() + trades.len());

    for journal in journals {
        let Some(author) = authors.get(&journal.user_id) else {
            continue;
        };
        items.push(FeedItem::Journal {
            created_at: journal.created_at,
            author: author.clone(),
            journal: JournalResponse {
                images: journal_images.remove(&journal.id).unwrap_or_default(),
                journal,
            },
        });
    }

    for trade in trades {
        let Some(author) = authors.get(&trade.user_id) else {
            continue;
        };
        items.push(FeedItem::Trade {
            created_at: trade.created_at,
            author: author.clone(),
            trade: TradeResponse {
                images: trade_images.remove(&trade.id).unwrap_or_default(),
                trade,
            },
        });
    }

    items.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.item_id().cmp(&a.item_id()))
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_750_000_000 + seconds, 0).unwrap()
    }

    fn journal(user_id: Uuid, created_at: DateTime<Utc>) -> Journal {
        Journal {
            id: Uuid::new_v4(),
            user_id,
            title: "Morning notes".into(),
            content: "Sat on hands all day.".into(),
            journal_date: created_at.date_naive(),
            created_at,
            updated_at: created_at,
        }
    }

    fn trade(user_id: Uuid, created_at: DateTime<Utc>) -> Trade {
        Trade {
            id: Uuid::new_v4(),
            user_id,
            trade_date: created_at.date_naive(),
            ticker: "MSFT".into(),
            position: crate::models::Position::Buy,
            quantity: "5".parse().unwrap(),
            entry_price: "410.00".parse().unwrap(),
            exit_price: None,
            profit: None,
            reason: None,
            retrospective: None,
            rating: None,
            retrospective_updated_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn author_map(ids: &[Uuid]) -> HashMap<Uuid, AuthorSummary> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                (
                    *id,
                    AuthorSummary {
                        id: *id,
                        nickname: format!("user{i}"),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_newer_journal_ranks_before_older_trade() {
        let author = Uuid::new_v4();
        let authors = author_map(&[author]);
        let items = assemble(
            vec![journal(author, ts(200))],
            vec![trade(author, ts(100))],
            &authors,
            HashMap::new(),
            HashMap::new(),
        );
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], FeedItem::Journal { .. }));
        assert!(matches!(items[1], FeedItem::Trade { .. }));
    }

    #[test]
    fn test_output_is_non_increasing_by_timestamp() {
        let author = Uuid::new_v4();
        let authors = author_map(&[author]);
        let journals = vec![
            journal(author, ts(30)),
            journal(author, ts(90)),
            journal(author, ts(10)),
        ];
        let trades = vec![trade(author, ts(60)), trade(author, ts(120))];
        let items = assemble(journals, trades, &authors, HashMap::new(), HashMap::new());
        for pair in items.windows(2) {
            assert!(pair[0].created_at() >= pair[1].created_at());
        }
    }

    #[test]
    fn test_missing_author_drops_item_silently() {
        let known = Uuid::new_v4();
        let ghost = Uuid::new_v4();
        let authors = author_map(&[known]);
        let items = assemble(
            vec![journal(known, ts(10)), journal(ghost, ts(20))],
            vec![trade(ghost, ts(30))],
            &authors,
            HashMap::new(),
            HashMap::new(),
        );
        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], FeedItem::Journal { author, .. } if author.id == known));
    }

    #[test]
    fn test_equal_timestamps_order_deterministically() {
        let author = Uuid::new_v4();
        let authors = author_map(&[author]);
        let j1 = journal(author, ts(50));
        let j2 = journal(author, ts(50));
        let t1 = trade(author, ts(50));

        let first = assemble(
            vec![j1.clone(), j2.clone()],
            vec![t1.clone()],
            &authors,
            HashMap::new(),
            HashMap::new(),
        );
        let second = assemble(
            vec![j2, j1],
            vec![t1],
            &authors,
            HashMap::new(),
            HashMap::new(),
        );
        let first_ids: Vec<Uuid> = first.iter().map(|i| i.item_id()).collect();
        let second_ids: Vec<Uuid> = second.iter().map(|i| i.item_id()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_images_land_on_their_own_item() {
        let author = Uuid::new_v4();
        let authors = author_map(&[author]);
        let j = journal(author, ts(10));
        let meta = ImageMeta {
            id: Uuid::new_v4(),
            file_name: "chart.png".into(),
            content_type: "image/png".into(),
            size_bytes: 2048,
            created_at: ts(5),
        };
        let mut journal_images = HashMap::new();
        journal_images.insert(j.id, vec![meta]);

        let items = assemble(vec![j], Vec::new(), &authors, journal_images, HashMap::new());
        match &items[0] {
            FeedItem::Journal { journal, .. } => {
                assert_eq!(journal.images.len(), 1);
                assert_eq!(journal.images[0].file_name, "chart.png");
            }
            other => panic!("expected journal item, got {other:?}"),
        }
    }
}
