//! Shared pagination utilities
//!
//! Every paginated list answers with the same envelope:
//!
//! ```json
//! { "items": [...], "total": 40, "page": 2, "pages": 4, "take": 12 }
//! ```
//!
//! `pages` is never below 1, so an empty list still reports one page.

use serde::{Deserialize, Serialize};

/// Page size used by the catalog and editorial lists.
pub const CATALOG_PAGE_SIZE: i64 = 12;

/// Resolved page and page size for a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub take: i64,
}

impl PageRequest {
    /// Fixed page size; only the page number comes from the client.
    pub fn fixed(page: Option<i64>, take: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            take,
        }
    }

    /// Client-controlled page size, defaulting to `default_take` and clamped
    /// to `1..=max_take`.
    pub fn clamped(page: Option<i64>, take: Option<i64>, default_take: i64, max_take: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            take: take.unwrap_or(default_take).clamp(1, max_take),
        }
    }

    /// Offset for the SQL OFFSET clause. Saturates for absurd page numbers,
    /// which then simply yield an empty page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.take)
    }
}

/// List envelope shared by every paginated endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub take: i64,
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            pages: total_pages(total, request.take),
            take: request.take,
        }
    }
}

/// ceil(total / take), at least 1
pub fn total_pages(total: i64, take: i64) -> i64 {
    if take <= 0 {
        return 1;
    }
    ((total + take - 1) / take).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_page_size() {
        let request = PageRequest::fixed(Some(3), CATALOG_PAGE_SIZE);
        assert_eq!(request.page, 3);
        assert_eq!(request.offset(), 24);

        assert_eq!(PageRequest::fixed(None, 12).page, 1);
        assert_eq!(PageRequest::fixed(Some(-4), 12).page, 1);
    }

    #[test]
    fn test_clamped_page_size() {
        assert_eq!(PageRequest::clamped(None, None, 12, 50).take, 12);
        assert_eq!(PageRequest::clamped(None, Some(500), 12, 50).take, 50);
        assert_eq!(PageRequest::clamped(None, Some(0), 12, 50).take, 1);
        assert_eq!(PageRequest::clamped(Some(2), Some(50), 50, 100).offset(), 50);
    }

    #[test]
    fn test_huge_page_saturates() {
        let request = PageRequest::fixed(Some(i64::MAX), CATALOG_PAGE_SIZE);
        assert_eq!(request.offset(), i64::MAX);

        let request = PageRequest::clamped(Some(i64::MAX), Some(50), 12, 50);
        assert_eq!(request.offset(), i64::MAX);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 12), 1);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(100, 50), 2);
    }

    #[test]
    fn test_list_page_envelope() {
        let page = ListPage::new(vec![1, 2, 3], 27, PageRequest::fixed(Some(3), 12));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["total"], 27);
        assert_eq!(json["page"], 3);
        assert_eq!(json["pages"], 3);
        assert_eq!(json["take"], 12);
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
    }
}
