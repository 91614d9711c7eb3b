use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Image metadata attached to a trade or journal. Blob bytes are stored and
/// served elsewhere; the core only ever reads the descriptors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

/// Row shape for batch image lookups; `parent_id` is the owning trade or
/// journal id and is used only for grouping, never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct ImageMetaRow {
    pub parent_id: Uuid,
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ImageMetaRow> for ImageMeta {
    fn from(row: ImageMetaRow) -> Self {
        Self {
            id: row.id,
            file_name: row.file_name,
            content_type: row.content_type,
            size_bytes: row.size_bytes,
            created_at: row.created_at,
        }
    }
}
