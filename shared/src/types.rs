//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

impl Pagination {
    /// Zero-based offset of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.per_page as usize
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Slice a full in-memory result set down to one page
    pub fn from_full(items: Vec<T>, pagination: &Pagination) -> Self {
        let total_items = items.len() as u64;
        let per_page = pagination.per_page.max(1);
        let total_pages = total_items.div_ceil(per_page as u64) as u32;
        let data = items
            .into_iter()
            .skip(pagination.offset())
            .take(per_page as usize)
            .collect();

        Self {
            data,
            pagination: PaginationMeta {
                page: pagination.page,
                per_page,
                total_items,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_slices_pages() {
        let items: Vec<i64> = (0..45).collect();
        let page = PaginatedResponse::from_full(
            items,
            &Pagination {
                page: 3,
                per_page: 20,
            },
        );

        assert_eq!(page.data, (40..45).collect::<Vec<_>>());
        assert_eq!(page.pagination.total_items, 45);
        assert_eq!(page.pagination.total_pages, 3);
    }
}
