//! Deterministic pagination over the ranked sequence.

use serde::{Deserialize, Serialize};

/// Pagination metadata.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of items across all pages.
    pub total: i64,
    /// Total number of pages; zero for an empty sequence.
    pub total_pages: i64,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Whether a previous page exists.
    pub has_prev: bool,
}

impl Pagination {
    /// Build metadata for a page of a sequence of `total` items.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Offset of the first item of this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    /// Check if on the first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on the last page (or past it).
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 20, 0)
    }
}

/// Slice a ranked sequence into the requested page.
///
/// Pages beyond the end return an empty slice with correct metadata,
/// never an error.
pub fn paginate<T>(items: Vec<T>, page: i64, per_page: i64) -> (Vec<T>, Pagination) {
    let total = items.len() as i64;
    let pagination = Pagination::new(page, per_page, total);

    let start = pagination.offset();
    if start >= total || start < 0 {
        return (Vec::new(), pagination);
    }
    let page_items: Vec<T> = items
        .into_iter()
        .skip(start as usize)
        .take(per_page as usize)
        .collect();
    (page_items, pagination)
}
