//! Pagination parameters and response metadata.

use serde::Serialize;

/// Caller-supplied paging window, normalized.
///
/// Non-positive values fall back to the defaults; `limit` is capped at
/// [`PageParams::MAX_LIMIT`] so a caller cannot request an unbounded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p,
            _ => Self::DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if l >= 1 => l.min(Self::MAX_LIMIT),
            _ => Self::DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    /// Row offset of the first item on this page. Saturates instead of
    /// overflowing, so an absurd `page` lands past the data rather than
    /// wrapping.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Metadata block for a list response over `total_items` rows.
    pub fn meta(&self, total_items: i64) -> Pagination {
        Pagination {
            current_page: self.page,
            total_pages: total_pages(total_items, self.limit),
            total_items,
            items_per_page: self.limit,
        }
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination block embedded in every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

/// `ceil(total / limit)`.
fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}
