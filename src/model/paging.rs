//! Page arithmetic shared by every paged model.
//!
//! A page is the half-open row range
//! `[page * page_size, min((page + 1) * page_size, total))`. There is always
//! at least one page, even for an empty dataset.

use std::ops::Range;

/// Page containing `row`, `None` when `page_size` is zero.
#[inline]
pub fn row_to_page(row: usize, page_size: usize) -> Option<usize> {
    if page_size == 0 {
        None
    } else {
        Some(row / page_size)
    }
}

/// `max(1, ceil(total / page_size))`, treating a zero page size as one.
#[inline]
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Paging state: dataset size, page size, current page and page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    total: usize,
    page_size: usize,
    page: usize,
    page_count: usize,
}

impl Paging {
    /// Paging over `total` rows positioned on page 0.
    pub fn new(total: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            total,
            page_size,
            page: 0,
            page_count: page_count(total, page_size),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Apply a new page size and requested page.
    ///
    /// The page size is clamped to at least 1 and the page into
    /// `[0, page_count)`. Returns the resulting page.
    pub fn configure(&mut self, page_size: usize, requested_page: usize) -> usize {
        self.page_size = page_size.max(1);
        self.page_count = page_count(self.total, self.page_size);
        self.page = requested_page.min(self.page_count - 1);
        self.page
    }

    /// Change the dataset size, keeping the page size and clamping the page.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.page_count = page_count(total, self.page_size);
        self.page = self.page.min(self.page_count - 1);
    }

    /// Move to `page`; returns `false` (and changes nothing) when out of range.
    pub fn set_page(&mut self, page: usize) -> bool {
        if !self.contains_page(page) {
            return false;
        }
        self.page = page;
        true
    }

    pub fn contains_page(&self, page: usize) -> bool {
        page < self.page_count
    }

    /// Absolute rows of `page`, empty when the page holds no rows.
    pub fn page_range(&self, page: usize) -> Range<usize> {
        let start = page.saturating_mul(self.page_size).min(self.total);
        let end = page
            .saturating_add(1)
            .saturating_mul(self.page_size)
            .min(self.total);
        start..end
    }

    /// Absolute rows of the current page.
    pub fn current_range(&self) -> Range<usize> {
        self.page_range(self.page)
    }

    pub fn row_to_page(&self, row: usize) -> Option<usize> {
        row_to_page(row, self.page_size)
    }

    /// Page holding `row`, clamped to the last page for rows past the end.
    pub fn page_of_row(&self, row: usize) -> usize {
        (row / self.page_size).min(self.page_count() - 1)
    }

    /// Position of `row` inside its page.
    pub fn offset_in_page(&self, row: usize) -> usize {
        row % self.page_size
    }
}

// =============================================================================
// Tests
// =============================================================================
