pub mod cache;
pub mod feed_service;
pub mod follow_service;
pub mod image_service;
pub mod journal_service;
pub mod stats;
pub mod stock_service;
pub mod trade_service;
pub mod user_service;

use crate::errors::AppError;

pub(crate) const MAX_PAGE_SIZE: i64 = 100;

/// Pagination bounds shared by every listing endpoint, checked before any
/// store access. The upper bound also keeps the feed's over-fetch multiple
/// from overflowing.
pub(crate) fn validate_page(page: i64, size: i64) -> Result<(), AppError> {
    if page < 0 {
        return Err(AppError::Validation("Page must be >= 0".into()));
    }
    if size < 1 {
        return Err(AppError::Validation("Size must be >= 1".into()));
    }
    if size > MAX_PAGE_SIZE {
        return Err(AppError::Validation(format!(
            "Size must be <= {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds() {
        assert!(validate_page(0, 1).is_ok());
        assert!(validate_page(3, 20).is_ok());
        assert!(validate_page(-1, 20).is_err());
        assert!(validate_page(0, 0).is_err());
    }

    #[test]
    fn test_size_is_capped() {
        assert!(validate_page(0, MAX_PAGE_SIZE).is_ok());
        assert!(validate_page(0, MAX_PAGE_SIZE + 1).is_err());
        assert!(validate_page(0, i64::MAX).is_err());
    }
}
