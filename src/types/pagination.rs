//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::{AppError, AppResult};

/// Pagination query parameters, reusable across all list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Validate boundary constraints: page >= 1, 1 <= limit <= MAX_PAGE_SIZE.
    pub fn validate(&self) -> AppResult<()> {
        if self.page < 1 {
            return Err(AppError::validation("page must be greater than 0"));
        }
        if self.limit < 1 || self.limit > MAX_PAGE_SIZE {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.limit.min(MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper, reusable for all list responses.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Self {
            data,
            meta: PaginationMeta {
                page,
                limit,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_arithmetic() {
        let params = PaginationParams { page: 1, limit: 10 };
        assert_eq!(params.offset(), 0);

        let params = PaginationParams { page: 3, limit: 25 };
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_limit_capped_at_maximum() {
        let params = PaginationParams {
            page: 1,
            limit: 500,
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);

        let params = PaginationParams { page: 1, limit: 42 };
        assert_eq!(params.limit(), 42);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(PaginationParams { page: 0, limit: 10 }.validate().is_err());
        assert!(PaginationParams { page: 1, limit: 0 }.validate().is_err());
        assert!(PaginationParams {
            page: 1,
            limit: MAX_PAGE_SIZE + 1
        }
        .validate()
        .is_err());
        assert!(PaginationParams { page: 1, limit: 10 }.validate().is_ok());
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let paged: Paginated<u32> = Paginated::new(vec![], 1, 10, 0);
        assert_eq!(paged.meta.total_pages, 0);

        let paged: Paginated<u32> = Paginated::new(vec![], 1, 10, 10);
        assert_eq!(paged.meta.total_pages, 1);

        let paged: Paginated<u32> = Paginated::new(vec![], 1, 10, 11);
        assert_eq!(paged.meta.total_pages, 2);

        let paged: Paginated<u32> = Paginated::new(vec![], 2, 25, 99);
        assert_eq!(paged.meta.total_pages, 4);
    }

    #[test]
    fn test_window_never_exceeds_limit() {
        // The repository fetches at most `limit()` rows per page; the wrapper
        // reflects whatever slice it is given.
        let data: Vec<u32> = (0..10).collect();
        let paged = Paginated::new(data, 1, 10, 35);
        assert!(paged.data.len() as u64 <= paged.meta.limit);
        assert_eq!(paged.meta.total_pages, 4);
    }
}
