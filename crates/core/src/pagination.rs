//! Page-number pagination as used by the commerce API.

use serde::{Deserialize, Serialize};

/// Products shown per grid page.
pub const PRODUCT_PAGE_SIZE: u32 = 12;

/// Orders shown per history page.
pub const ORDER_PAGE_SIZE: u32 = 10;

/// Most numbered links shown around the current page.
pub const MAX_PAGE_LINKS: u32 = 7;

/// A 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Create a request, clamping `page` to at least 1.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
        }
    }

    /// A product grid page.
    #[must_use]
    pub fn products(page: Option<u32>) -> Self {
        Self::new(page.unwrap_or(1), PRODUCT_PAGE_SIZE)
    }

    /// An order history page.
    #[must_use]
    pub fn orders(page: Option<u32>) -> Self {
        Self::new(page.unwrap_or(1), ORDER_PAGE_SIZE)
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.page == 1
    }
}

/// One page of results plus the total page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Wrap items, treating a missing or zero page count as a single page.
    ///
    /// `page` is clamped into `1..=total_pages`.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, total_pages: Option<u32>) -> Self {
        let total_pages = total_pages.unwrap_or(1).max(1);
        Self {
            items,
            page: page.clamp(1, total_pages),
            total_pages,
        }
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    #[must_use]
    pub const fn previous_page(&self) -> u32 {
        if self.page > 1 { self.page - 1 } else { 1 }
    }

    #[must_use]
    pub const fn next_page(&self) -> u32 {
        if self.page < self.total_pages {
            self.page + 1
        } else {
            self.total_pages
        }
    }

    /// Page numbers for numbered links: at most [`MAX_PAGE_LINKS`],
    /// centred on the current page where the ends allow.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<u32> {
        let span = MAX_PAGE_LINKS.min(self.total_pages);
        let first = self
            .page
            .saturating_sub(span / 2)
            .clamp(1, self.total_pages - span + 1);
        (first..first + span).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
