//! Page-based pagination.
//!
//! [`Pagination`] turns a page size and a 1-based page number into the
//! `(limit, offset)` window a data source reads, and reports page counts once
//! the total row count is known.
//!
//! ```
//! use data_provider::Pagination;
//!
//! let pagination = Pagination::new()
//!     .with_page_size(3)?
//!     .with_current_page(2)?
//!     .with_total_count(10);
//!
//! assert_eq!(pagination.limit(), 3);
//! assert_eq!(pagination.offset(), 3);
//! assert_eq!(pagination.total_pages(), 4);
//! # Ok::<(), data_provider::Error>(())
//! ```

mod page_info;
mod window;

use serde::Serialize;

use crate::config::PaginationConfig;
use crate::constants::{DEFAULT_PAGE_SIZE, FIRST_PAGE};
use crate::{Error, Params, Result};

pub use page_info::PageInfo;
pub use window::PageWindow;

/// Pagination state for one request.
///
/// Invalid page sizes and page numbers are rejected when set, so every
/// instance satisfies `page_size >= 1` and `current_page >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pagination {
    page_size: u64,
    current_page: u64,
    total_count: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    /// First page, default page size, no rows.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: FIRST_PAGE,
            total_count: 0,
        }
    }

    /// Read the page number and page size from request parameters.
    ///
    /// Missing parameters fall back to page 1 and the configured page size.
    pub fn from_params(params: &Params, config: &PaginationConfig) -> Result<Self> {
        let page_size = match int_param(params, &config.page_size_param)? {
            Some(size) => size,
            None => i64::try_from(config.page_size).unwrap_or(i64::MAX),
        };
        let page = int_param(params, &config.page_param)?.unwrap_or(1);

        Self::new().with_page_size(page_size)?.with_current_page(page)
    }

    /// Set the number of rows per page.
    pub fn with_page_size(mut self, page_size: i64) -> Result<Self> {
        self.page_size = positive(page_size).ok_or(Error::InvalidPageSize(page_size))?;
        Ok(self)
    }

    /// Set the 1-based page number.
    pub fn with_current_page(mut self, page: i64) -> Result<Self> {
        self.current_page = positive(page).ok_or(Error::InvalidPage(page))?;
        Ok(self)
    }

    /// Set the total row count reported by the data source.
    #[must_use]
    pub const fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = total_count;
        self
    }

    /// Rows per page.
    #[inline]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// 1-based page number.
    #[inline]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Total row count, as last set.
    #[inline]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// LIMIT for the current page.
    #[inline]
    pub const fn limit(&self) -> u64 {
        self.page_size
    }

    /// OFFSET for the current page.
    #[inline]
    pub const fn offset(&self) -> u64 {
        self.page_size.saturating_mul(self.current_page - 1)
    }

    /// Window for the current page.
    #[inline]
    pub const fn window(&self) -> PageWindow {
        PageWindow::for_page(self.page_size, self.current_page)
    }

    /// Number of pages needed for the total row count.
    pub const fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    /// Whether a page follows the current one.
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Whether a page precedes the current one.
    pub const fn has_prev_page(&self) -> bool {
        self.current_page > FIRST_PAGE
    }
}

fn positive(value: i64) -> Option<u64> {
    u64::try_from(value).ok().filter(|v| *v >= 1)
}

fn int_param(params: &Params, name: &str) -> Result<Option<i64>> {
    params
        .get(name)
        .map(|raw| {
            raw.trim().parse::<i64>().map_err(|_| Error::InvalidParam {
                name: name.to_string(),
                value: raw.clone(),
            })
        })
        .transpose()
}
