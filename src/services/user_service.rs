use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{JournalResponse, Page, TradeResponse, UpdateProfile, UserProfile, UserSearchResult};
use crate::services::cache::{CacheKey, ResponseCache};
use crate::services::{follow_service, journal_service, trade_service, validate_page};

/// The single cross-user access-control decision: viewing someone else's
/// trades or journals requires following them. Viewing yourself always
/// passes, whatever the follow graph says.
pub async fn require_follow_or_self(
    pool: &PgPool,
    viewer_id: Uuid,
    target_id: Uuid,
) -> Result<(), AppError> {
    if viewer_id == target_id {
        return Ok(());
    }
    if !follow_service::is_following(pool, viewer_id, target_id).await? {
        return Err(AppError::Forbidden("Follow required to view this content"));
    }
    Ok(())
}

pub async fn profile(
    pool: &PgPool,
    cache: &ResponseCache,
    viewer_id: Uuid,
    target_id: Uuid,
) -> Result<UserProfile, AppError> {
    let key = CacheKey::new("user_profile", viewer_id, target_id.to_string());
    if let Some(hit) = cache.get::<UserProfile>(&key) {
        return Ok(hit);
    }

    let user = db::user_queries::fetch_one(pool, target_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    let is_own = viewer_id == target_id;
    let profile = UserProfile {
        id: user.id,
        nickname: user.nickname,
        bio: user.bio,
        created_at: user.created_at,
        follower_count: follow_service::follower_count(pool, target_id).await?,
        following_count: follow_service::following_count(pool, target_id).await?,
        is_following: if is_own {
            false
        } else {
            follow_service::is_following(pool, viewer_id, target_id).await?
        },
        is_own_profile: is_own,
    };
    cache.put(key, &profile);
    Ok(profile)
}

pub async fn search(
    pool: &PgPool,
    query: &str,
    page: i64,
    size: i64,
) -> Result<Page<UserSearchResult>, AppError> {
    validate_page(page, size)?;
    let users = db::user_queries::search_by_nickname(pool, query, size, page * size).await?;
    let total = db::user_queries::count_by_nickname(pool, query).await?;
    let content = users
        .into_iter()
        .map(|u| UserSearchResult {
            id: u.id,
            nickname: u.nickname,
            bio: u.bio,
        })
        .collect();
    Ok(Page::new(content, total, page, size))
}

pub async fn update_profile(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    input: UpdateProfile,
) -> Result<(), AppError> {
    let updated = db::user_queries::update_bio(pool, user_id, input.bio.as_deref()).await?;
    if updated == 0 {
        return Err(AppError::NotFound("User"));
    }
    cache.flush_all();
    Ok(())
}

/// Another user's journals, gated by the follow-or-self rule.
pub async fn user_journals(
    pool: &PgPool,
    viewer_id: Uuid,
    target_id: Uuid,
    page: i64,
    size: i64,
) -> Result<Page<JournalResponse>, AppError> {
    require_follow_or_self(pool, viewer_id, target_id).await?;
    journal_service::list(pool, target_id, None, None, page, size).await
}

/// Another user's trades, gated by the follow-or-self rule.
pub async fn user_trades(
    pool: &PgPool,
    viewer_id: Uuid,
    target_id: Uuid,
    page: i64,
    size: i64,
) -> Result<Page<TradeResponse>, AppError> {
    require_follow_or_self(pool, viewer_id, target_id).await?;
    trade_service::list(pool, target_id, None, None, None, None, page, size).await
}
