//! Skip/take pagination over the product store

use serde::Serialize;

pub const DEFAULT_PAGE_NUMBER: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Normalized page parameters
///
/// Non-positive inputs fall back to the defaults (1 / 10).
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    number: u64,
    size: u64,
}

impl PageRequest {
    pub fn new(number: i64, size: i64) -> Self {
        Self {
            number: if number <= 0 {
                DEFAULT_PAGE_NUMBER
            } else {
                number as u64
            },
            size: if size <= 0 {
                DEFAULT_PAGE_SIZE
            } else {
                size as u64
            },
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of records to skip: (page_number - 1) * page_size, saturating
    /// so absurd page parameters cannot overflow.
    pub fn offset(&self) -> u64 {
        self.number.saturating_sub(1).saturating_mul(self.size)
    }
}

/// One page of results plus pagination metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_item_count: u64,
    pub page_number: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_item_count: u64, page: PageRequest) -> Self {
        Self {
            items,
            total_item_count,
            page_number: page.number(),
            page_size: page.size(),
            total_pages: total_item_count.div_ceil(page.size()),
        }
    }
}
