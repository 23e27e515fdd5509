//! Listing Paginator: page arithmetic for the aggregate listing.

use serde::{Deserialize, Serialize};

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Page 0 becomes 1, page size 0 becomes `default_size`, anything above
    /// `max_size` is clamped.
    pub fn normalize(self, default_size: u64, max_size: u64) -> Self {
        let page_size = match self.page_size {
            0 => default_size,
            size => size.min(max_size),
        };
        Self {
            page: self.page.max(1),
            page_size,
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page,
            page_size: request.page_size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(2, 10).offset(), 10);
        assert_eq!(PageRequest::new(3, 25).offset(), 50);
        assert_eq!(PageRequest::new(2, 10).limit(), 10);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(PageRequest::new(0, 0).normalize(20, 100), PageRequest::new(1, 20));
        assert_eq!(PageRequest::new(4, 500).normalize(20, 100), PageRequest::new(4, 100));
        assert_eq!(PageRequest::new(2, 10).normalize(20, 100), PageRequest::new(2, 10));
    }

    #[test]
    fn test_second_page_of_fifteen() {
        let request = PageRequest::new(2, 10);
        let page = Page::new(vec![(); 5], 15, request);

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next());
        assert!(Page::new(vec![(); 10], 15, PageRequest::new(1, 10)).has_next());
    }

    #[test]
    fn test_empty_listing() {
        let page: Page<()> = Page::new(vec![], 0, PageRequest::new(1, 20));
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
    }
}
