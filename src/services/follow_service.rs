use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{FollowStatus, FollowUser, Page, User};
use crate::services::cache::ResponseCache;
use crate::services::validate_page;

pub async fn follow(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    target_id: Uuid,
) -> Result<(), AppError> {
    if user_id == target_id {
        return Err(AppError::Validation("Cannot follow yourself".into()));
    }
    db::user_queries::fetch_one(pool, target_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    if db::follow_queries::exists(pool, user_id, target_id).await? {
        return Err(AppError::Conflict("Already following"));
    }
    db::follow_queries::create(pool, user_id, target_id).await?;
    cache.flush_all();
    Ok(())
}

/// Idempotent: unfollowing someone you do not follow is a no-op.
pub async fn unfollow(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    target_id: Uuid,
) -> Result<(), AppError> {
    db::follow_queries::delete(pool, user_id, target_id).await?;
    cache.flush_all();
    Ok(())
}

pub async fn is_following(pool: &PgPool, user_id: Uuid, target_id: Uuid) -> Result<bool, AppError> {
    Ok(db::follow_queries::exists(pool, user_id, target_id).await?)
}

pub async fn status(
    pool: &PgPool,
    user_id: Uuid,
    target_id: Uuid,
) -> Result<FollowStatus, AppError> {
    Ok(FollowStatus {
        is_following: is_following(pool, user_id, target_id).await?,
    })
}

pub async fn follower_count(pool: &PgPool, user_id: Uuid) -> Result<i64, AppError> {
    Ok(db::follow_queries::count_followers(pool, user_id).await?)
}

pub async fn following_count(pool: &PgPool, user_id: Uuid) -> Result<i64, AppError> {
    Ok(db::follow_queries::count_following(pool, user_id).await?)
}

pub async fn following_ids(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, AppError> {
    Ok(db::follow_queries::following_ids(pool, user_id).await?)
}

/// Users following `target_id`, annotated with whether the viewer follows
/// each of them. Users deleted since the edge was written are skipped.
pub async fn followers(
    pool: &PgPool,
    target_id: Uuid,
    viewer_id: Uuid,
    page: i64,
    size: i64,
) -> Result<Page<FollowUser>, AppError> {
    validate_page(page, size)?;
    let edges = db::follow_queries::fetch_followers(pool, target_id, size, page * size).await?;
    let total = db::follow_queries::count_followers(pool, target_id).await?;
    let listed: Vec<Uuid> = edges.iter().map(|e| e.follower_id).collect();
    let content = annotate(pool, viewer_id, &listed).await?;
    Ok(Page::new(content, total, page, size))
}

pub async fn following(
    pool: &PgPool,
    target_id: Uuid,
    viewer_id: Uuid,
    page: i64,
    size: i64,
) -> Result<Page<FollowUser>, AppError> {
    validate_page(page, size)?;
    let edges = db::follow_queries::fetch_following(pool, target_id, size, page * size).await?;
    let total = db::follow_queries::count_following(pool, target_id).await?;
    let listed: Vec<Uuid> = edges.iter().map(|e| e.following_id).collect();
    let content = annotate(pool, viewer_id, &listed).await?;
    Ok(Page::new(content, total, page, size))
}

async fn annotate(
    pool: &PgPool,
    viewer_id: Uuid,
    listed_ids: &[Uuid],
) -> Result<Vec<FollowUser>, AppError> {
    if listed_ids.is_empty() {
        return Ok(Vec::new());
    }
    let users: HashMap<Uuid, User> = db::user_queries::fetch_by_ids(pool, listed_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let viewer_follows: HashSet<Uuid> = db::follow_queries::following_ids(pool, viewer_id)
        .await?
        .into_iter()
        .collect();

    Ok(listed_ids
        .iter()
        .filter_map(|id| users.get(id))
        .map(|user| FollowUser {
            id: user.id,
            nickname: user.nickname.clone(),
            bio: user.bio.clone(),
            is_following: viewer_follows.contains(&user.id),
        })
        .collect())
}
