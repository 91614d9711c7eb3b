use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateJournal, Journal, JournalResponse, Page};
use crate::services::cache::ResponseCache;
use crate::services::{image_service, validate_page};

fn validate(input: &CreateJournal) -> Result<(), AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::Validation("Title cannot be empty".into()));
    }
    if input.title.chars().count() > 100 {
        return Err(AppError::Validation("Title must be at most 100 characters".into()));
    }
    Ok(())
}

async fn owned_journal(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Journal, AppError> {
    let journal = db::journal_queries::fetch_one(pool, id)
        .await?
        .ok_or(AppError::NotFound("Journal"))?;
    if journal.user_id != user_id {
        return Err(AppError::Forbidden("Not the owner of this journal"));
    }
    Ok(journal)
}

async fn attach_images(
    pool: &PgPool,
    journals: Vec<Journal>,
) -> Result<Vec<JournalResponse>, AppError> {
    let ids: Vec<Uuid> = journals.iter().map(|j| j.id).collect();
    let mut images = image_service::metas_by_journal_ids(pool, &ids).await?;
    Ok(journals
        .into_iter()
        .map(|j| JournalResponse {
            images: images.remove(&j.id).unwrap_or_default(),
            journal: j,
        })
        .collect())
}

pub async fn list(
    pool: &PgPool,
    user_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    page: i64,
    size: i64,
) -> Result<Page<JournalResponse>, AppError> {
    validate_page(page, size)?;
    let journals =
        db::journal_queries::fetch_filtered(pool, user_id, start_date, end_date, size, page * size)
            .await?;
    let total = db::journal_queries::count_filtered(pool, user_id, start_date, end_date).await?;
    let content = attach_images(pool, journals).await?;
    Ok(Page::new(content, total, page, size))
}

pub async fn get(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<JournalResponse, AppError> {
    let journal = owned_journal(pool, user_id, id).await?;
    let mut responses = attach_images(pool, vec![journal]).await?;
    Ok(responses.remove(0))
}

pub async fn create(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    input: CreateJournal,
) -> Result<JournalResponse, AppError> {
    validate(&input)?;
    let journal = db::journal_queries::create(pool, user_id, &input).await?;
    cache.flush_all();
    Ok(JournalResponse {
        journal,
        images: Vec::new(),
    })
}

pub async fn update(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    id: Uuid,
    input: CreateJournal,
) -> Result<JournalResponse, AppError> {
    validate(&input)?;
    owned_journal(pool, user_id, id).await?;
    let journal = db::journal_queries::update(pool, id, input.title.trim(), &input.content)
        .await?
        .ok_or(AppError::NotFound("Journal"))?;
    cache.flush_all();
    let mut responses = attach_images(pool, vec![journal]).await?;
    Ok(responses.remove(0))
}

pub async fn delete(
    pool: &PgPool,
    cache: &ResponseCache,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    owned_journal(pool, user_id, id).await?;
    // Image rows and the journal go together or not at all.
    let mut tx = pool.begin().await?;
    db::image_queries::delete_for_journal(&mut *tx, id).await?;
    db::journal_queries::delete(&mut *tx, id).await?;
    tx.commit().await?;
    cache.flush_all();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> CreateJournal {
        CreateJournal {
            title: title.into(),
            content: "Watched the open, stayed out.".into(),
            journal_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        }
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        assert!(matches!(validate(&input("  ")), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_overlong_title() {
        let long = "a".repeat(101);
        assert!(matches!(validate(&input(&long)), Err(AppError::Validation(_))));
        assert!(validate(&input(&"a".repeat(100))).is_ok());
    }
}
