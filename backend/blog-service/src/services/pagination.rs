//! Fixed-size page-number pagination.

use serde::{Deserialize, Serialize};

/// Items per page for every paginated listing.
pub const PAGE_SIZE: i64 = 10;

/// `?page=` query parameter. Anything that is not a positive integer means
/// the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn request(&self) -> PageRequest {
        let number = self
            .page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1);
        PageRequest::new(number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: i64,
}

impl PageRequest {
    pub fn new(number: i64) -> Self {
        Self {
            number: number.max(1),
        }
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub num_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: i64) -> Self {
        let num_pages = num_pages(total_count);
        Self {
            items,
            page: request.number(),
            page_size: PAGE_SIZE,
            total_count,
            num_pages,
            has_next: request.number() < num_pages,
            has_previous: request.number() > 1,
        }
    }
}

/// Page count for `total` items; an empty listing still has one (empty) page.
pub fn num_pages(total: i64) -> i64 {
    if total <= 0 {
        1
    } else {
        (total + PAGE_SIZE - 1) / PAGE_SIZE
    }
}
