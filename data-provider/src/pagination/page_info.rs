//! PageInfo struct for pagination responses.

use serde::Serialize;

use super::Pagination;

/// Page metadata for paginated responses.
///
/// # Example
///
/// ```
/// use data_provider::{PageInfo, Pagination};
///
/// let pagination = Pagination::new()
///     .with_page_size(20)?
///     .with_current_page(2)?
///     .with_total_count(145);
/// let info = PageInfo::from(pagination);
///
/// assert_eq!(info.total_pages, 8);
/// assert!(info.has_next);
/// assert!(info.has_prev);
/// # Ok::<(), data_provider::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct PageInfo {
    /// Current page number (starts at 1).
    pub page: u64,
    /// Number of rows per page.
    pub page_size: u64,
    /// Total number of rows across all pages.
    pub total_count: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there is a page after this one.
    pub has_next: bool,
    /// Whether there is a page before this one.
    pub has_prev: bool,
}

impl From<Pagination> for PageInfo {
    fn from(pagination: Pagination) -> Self {
        Self {
            page: pagination.current_page(),
            page_size: pagination.page_size(),
            total_count: pagination.total_count(),
            total_pages: pagination.total_pages(),
            has_next: pagination.has_next_page(),
            has_prev: pagination.has_prev_page(),
        }
    }
}
