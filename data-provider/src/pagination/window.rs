//! Limit/offset windows.

use std::ops::Range;

use serde::Serialize;

/// The `(limit, offset)` pair handed to a data source.
///
/// `offset` is always a raw, zero-based row offset. Page numbers are
/// converted explicitly with [`PageWindow::for_page`]; callers that already
/// hold a row offset use [`PageWindow::from_row_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub struct PageWindow {
    /// Maximum number of rows to return.
    pub limit: u64,
    /// Number of rows to skip.
    pub offset: u64,
}

impl PageWindow {
    /// Window for a 1-based page number. Page `0` is treated as page `1`.
    ///
    /// ```
    /// use data_provider::PageWindow;
    ///
    /// let window = PageWindow::for_page(20, 3);
    /// assert_eq!((window.limit, window.offset), (20, 40));
    /// ```
    #[must_use]
    pub const fn for_page(page_size: u64, page: u64) -> Self {
        Self {
            limit: page_size,
            offset: page_size.saturating_mul(page.saturating_sub(1)),
        }
    }

    /// Window starting at a raw row offset.
    #[must_use]
    pub const fn from_row_offset(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// A single-row window at the same offset.
    #[must_use]
    pub const fn first_row(self) -> Self {
        Self {
            limit: 1,
            offset: self.offset,
        }
    }

    /// Slice bounds of this window over `len` rows, clamped to the data.
    pub fn range(self, len: usize) -> Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(len);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        start..start.saturating_add(limit).min(len)
    }
}
