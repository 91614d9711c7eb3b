use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Minimal author identity attached to feed items and listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: Uuid,
    pub nickname: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname.clone(),
        }
    }
}

// Serialize and Deserialize both, so profiles can round-trip through the
// response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub nickname: String,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub follower_count: i64,
    pub following_count: i64,
    pub is_following: bool,
    pub is_own_profile: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchResult {
    pub id: Uuid,
    pub nickname: String,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub bio: Option<String>,
}
