use serde::Serialize;

/// Offset-paginated response envelope shared by every listing endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub page: i64,
    pub size: i64,
}

impl<T> Page<T> {
    pub fn empty(page: i64, size: i64) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            page,
            size,
        }
    }

    /// Wrap one page of content with totals obtained from a separate count query.
    pub fn new(content: Vec<T>, total_elements: i64, page: i64, size: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + size - 1) / size
        };
        Self {
            content,
            total_elements,
            total_pages,
            page,
            size,
        }
    }

    /// Slice an already-materialized list. Totals reflect the list length,
    /// not a global count; the feed relies on this window-local behavior.
    pub fn from_vec(items: Vec<T>, page: i64, size: i64) -> Self {
        let total = items.len() as i64;
        let content: Vec<T> = items
            .into_iter()
            .skip((page * size) as usize)
            .take(size as usize)
            .collect();
        Self::new(content, total, page, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_has_zero_totals() {
        let page: Page<i32> = Page::empty(0, 20);
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 41, 0, 20);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_from_vec_slices_requested_window() {
        let page = Page::from_vec((0..7).collect(), 1, 3);
        assert_eq!(page.content, vec![3, 4, 5]);
        assert_eq!(page.total_elements, 7);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_from_vec_past_end_is_empty_but_keeps_totals() {
        let page = Page::from_vec(vec![1, 2], 5, 2);
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 1);
    }
}
