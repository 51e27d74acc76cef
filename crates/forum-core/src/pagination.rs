//! Page windows over ordered result sets.

use crate::error::DomainError;

pub const MIN_PAGE_SIZE: i64 = 5;
pub const MAX_PAGE_SIZE: i64 = 15;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_id: u64,
    page_size: u64,
}

impl PageRequest {
    /// `page_id` must be at least 1 and `page_size` within
    /// [`MIN_PAGE_SIZE`]..=[`MAX_PAGE_SIZE`].
    pub fn new(page_id: i64, page_size: i64) -> Result<Self, DomainError> {
        if page_id < 1 {
            return Err(DomainError::InvalidArgument(format!(
                "page_id must be at least 1, got {page_id}"
            )));
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(DomainError::InvalidArgument(format!(
                "page_size must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        // The offset must fit a signed 64-bit SQL OFFSET.
        if (page_id - 1).checked_mul(page_size).is_none() {
            return Err(DomainError::InvalidArgument(format!(
                "page_id {page_id} is too large for page_size {page_size}"
            )));
        }

        Ok(Self {
            page_id: page_id as u64,
            page_size: page_size as u64,
        })
    }

    pub fn page_id(&self) -> u64 {
        self.page_id
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        (self.page_id - 1) * self.page_size
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// Number of pages needed to show `total` rows, `limit` at a time.
///
/// Rounds up, so a partial trailing page counts. Zero rows means zero pages.
pub fn last_page(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// One page of results plus the counters a client needs to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub page_size: u64,
    pub last_page: u64,
    pub total_records: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_records: u64) -> Self {
        Self {
            items,
            current_page: request.page_id(),
            page_size: request.page_size(),
            last_page: last_page(total_records, request.limit()),
            total_records,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            last_page: self.last_page,
            total_records: self.total_records,
        }
    }
}
