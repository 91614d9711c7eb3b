use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{AuthorSummary, JournalResponse, TradeResponse};

/// One entry in the merged activity feed. Tagged union of the two entity
/// streams; `created_at` is the effective timestamp the feed ranks by.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedItem {
    #[serde(rename_all = "camelCase")]
    Journal {
        journal: JournalResponse,
        author: AuthorSummary,
        created_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Trade {
        trade: TradeResponse,
        author: AuthorSummary,
        created_at: DateTime<Utc>,
    },
}

impl FeedItem {
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            FeedItem::Journal { created_at, .. } => *created_at,
            FeedItem::Trade { created_at, .. } => *created_at,
        }
    }

    /// Secondary sort key so pagination stays stable across requests when
    /// timestamps collide.
    pub fn item_id(&self) -> Uuid {
        match self {
            FeedItem::Journal { journal, .. } => journal.journal.id,
            FeedItem::Trade { trade, .. } => trade.trade.id,
        }
    }
}
