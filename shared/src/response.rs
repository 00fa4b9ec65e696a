//! API Response types
//!
//! List endpoints answer with the paginated envelope:
//! ```json
//! {
//!     "count": 42,
//!     "next": "http://host/api/orders/?page=3",
//!     "previous": "http://host/api/orders/?page=1",
//!     "results": [ ... ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Default page size used by the API for list endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Paginated list envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Total number of items across all pages
    pub count: u64,
    /// Absolute URL of the next page, if any
    pub next: Option<String>,
    /// Absolute URL of the previous page, if any
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Wrap a complete list as a single page
    pub fn single(results: Vec<T>) -> Self {
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self::single(Vec::new())
    }
}

/// Envelope for endpoints that nest their payload under `data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Page cursor driving Previous/Next controls
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub page_size: u32,
    /// Total number of items
    pub total: u64,
}

impl Pager {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            page_size,
            total,
        }
    }

    /// Build a pager for a server-side page of results
    pub fn for_envelope<T>(page: u32, page_size: u32, envelope: &Paginated<T>) -> Self {
        Self::new(page, page_size, envelope.count)
    }

    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size as u64) as u32
        }
    }

    /// Previous control is disabled on the first page
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Next control is disabled on the last page (and when there are no pages)
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn next_page(&self) -> Self {
        if self.has_next() {
            Self {
                page: self.page + 1,
                ..*self
            }
        } else {
            *self
        }
    }

    pub fn previous_page(&self) -> Self {
        if self.has_previous() {
            Self {
                page: self.page - 1,
                ..*self
            }
        } else {
            *self
        }
    }

    /// Jump to a page, clamped into `1..=total_pages`
    pub fn go_to(&self, page: u32) -> Self {
        let last = self.total_pages().max(1);
        Self {
            page: page.clamp(1, last),
            ..*self
        }
    }
}

/// Slice out one page of an in-memory list
pub fn paginate<T>(items: &[T], page: u32, page_size: u32) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = (page.max(1) as usize - 1).saturating_mul(page_size as usize);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size as usize).min(items.len());
    &items[start..end]
}
