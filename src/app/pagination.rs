use std::ops::Range;

/// Rows shown per page; fixed for the life of the dashboard.
pub const PAGE_SIZE: usize = 10;

/// 1-based page cursor over the live dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(len: usize) -> usize {
        len.div_ceil(PAGE_SIZE).max(1)
    }

    /// Half-open index range of the current page, clamped to `len`.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = ((self.page - 1) * PAGE_SIZE).min(len);
        let end = (self.page * PAGE_SIZE).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.page < Self::total_pages(len)
    }

    /// Step back one page; returns `false` when already on the first page.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Step forward one page; returns `false` when already on the last page.
    pub fn next(&mut self, len: usize) -> bool {
        if !self.has_next(len) {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Pull the cursor back inside `[1, total_pages(len)]` after the dataset shrinks.
    pub fn clamp(&mut self, len: usize) {
        self.page = self.page.clamp(1, Self::total_pages(len));
    }
}
