use crate::PageRequest;

/// Rows-per-page choices offered by the pagination control.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 60, 100];
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Largest index that still has a one-based page number.
pub const MAX_PAGE_INDEX: usize = usize::MAX - 1;

/// Current page index (zero-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_index: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// A zero `page_size` falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            page_index: 0,
            page_size,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Moves to `page_index`, clamped to [`MAX_PAGE_INDEX`]. The store answers
    /// an empty page when the index is past the end. Returns whether the index
    /// changed.
    pub fn set_page(&mut self, page_index: usize) -> bool {
        let page_index = page_index.min(MAX_PAGE_INDEX);
        let changed = self.page_index != page_index;
        self.page_index = page_index;
        changed
    }

    /// Changes the page size and always restarts at the first page.
    /// Returns whether the (page, size) pair changed.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let before = *self;
        self.page_size = page_size;
        self.page_index = 0;
        before != *self
    }

    /// The one-based request matching the current position.
    pub fn request(&self) -> PageRequest {
        PageRequest {
            page: self.page_index.saturating_add(1),
            size: self.page_size,
        }
    }

    /// Number of pages needed for `total_count` rows; at least one.
    pub fn page_count(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.page_size).max(1)
    }
}
