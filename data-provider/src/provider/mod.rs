//! Data sources and the provider that pages through them.
//!
//! A [`DataSource`] knows how to count its rows and read one window of them
//! in a given order. [`DataProvider`] combines a source with a [`Sort`] and a
//! [`Pagination`] and derives row keys.
//!
//! ```
//! use data_provider::{ArraySource, DataProvider, Pagination, Sort, Value, records_from_json};
//! use serde_json::json;
//!
//! let rows = records_from_json(json!([
//!     {"id": 1, "username": "admin"},
//!     {"id": 2, "username": "user"},
//!     {"id": 3, "username": "guest"},
//! ]));
//!
//! let provider = DataProvider::new(ArraySource::new(rows))
//!     .with_sort(Sort::new().with_columns(["username"]).with_directive("-username"))
//!     .with_pagination(Pagination::new().with_page_size(2)?);
//!
//! let page = provider.page().unwrap();
//! let names: Vec<Value> = page.rows.iter().map(|r| r["username"].clone()).collect();
//! assert_eq!(names, [Value::from("user"), Value::from("guest")]);
//! assert_eq!(page.info.total_pages, 2);
//! # Ok::<(), data_provider::Error>(())
//! ```

mod array;
mod key;
#[cfg(feature = "sqlite")]
mod model;
#[cfg(feature = "sqlite")]
mod sql;

use std::iter::Zip;
use std::{slice, vec};

use serde::Serialize;

use crate::{Fields, OrderBy, PageInfo, PageWindow, Pagination, Result, Sort, Value};

pub use array::ArraySource;
pub use key::KeySelector;
#[cfg(feature = "sqlite")]
pub use model::{Model, ModelSource};
#[cfg(feature = "sqlite")]
pub use sql::{QuerySource, SqlSource};

/// A backing store that can be counted and read one window at a time.
///
/// Implementations own their error type; providers return it unchanged.
pub trait DataSource {
    /// Row type returned by reads.
    type Row;
    /// Failure reported by the backing store.
    type Error;

    /// Total number of rows, ignoring pagination.
    fn count(&self) -> Result<u64, Self::Error>;

    /// Read the rows inside `window`, ordered by `order_by`.
    fn fetch_page(
        &self,
        window: PageWindow,
        order_by: &OrderBy,
    ) -> Result<Vec<Self::Row>, Self::Error>;

    /// Key used when no [`KeySelector`] is configured: the row's position in
    /// the returned page.
    fn default_key(&self, row: &Self::Row, index: usize) -> Value {
        let _ = row;
        Value::from(index)
    }
}

/// Rows of one page with their keys and page metadata.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct Page<R> {
    /// Rows in the page, in order.
    pub rows: Vec<R>,
    /// One key per row.
    pub keys: Vec<Value>,
    /// Page metadata, computed with the current total count.
    pub info: PageInfo,
}

impl<R> Page<R> {
    /// Number of rows in the page.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the page has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over `(key, row)` pairs.
    pub fn iter(&self) -> Zip<slice::Iter<'_, Value>, slice::Iter<'_, R>> {
        self.keys.iter().zip(&self.rows)
    }

    /// Take the rows, dropping keys and metadata.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl<R> IntoIterator for Page<R> {
    type Item = (Value, R);
    type IntoIter = Zip<vec::IntoIter<Value>, vec::IntoIter<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter().zip(self.rows)
    }
}

impl<'a, R> IntoIterator for &'a Page<R> {
    type Item = (&'a Value, &'a R);
    type IntoIter = Zip<slice::Iter<'a, Value>, slice::Iter<'a, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sorting and pagination over a [`DataSource`].
///
/// Like [`Sort`] and [`Pagination`], the provider is configured by value:
/// each `with_*` call returns the updated provider.
#[derive(Debug)]
pub struct DataProvider<S: DataSource> {
    source: S,
    sort: Sort,
    pagination: Pagination,
    key: KeySelector<S::Row>,
}

impl<S> Clone for DataProvider<S>
where
    S: DataSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            sort: self.sort.clone(),
            pagination: self.pagination,
            key: self.key.clone(),
        }
    }
}

impl<S: DataSource> DataProvider<S> {
    /// Provider with no sorting, the default pagination and positional keys.
    pub fn new(source: S) -> Self {
        Self {
            source,
            sort: Sort::new(),
            pagination: Pagination::new(),
            key: KeySelector::default(),
        }
    }

    /// Replace the sort.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Replace the pagination.
    pub const fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Move to another 1-based page, keeping the page size.
    pub fn with_page(mut self, page: i64) -> Result<Self> {
        self.pagination = self.pagination.with_current_page(page)?;
        Ok(self)
    }

    /// Replace the key selector.
    pub fn with_key(mut self, key: KeySelector<S::Row>) -> Self {
        self.key = key;
        self
    }

    /// The wrapped source.
    #[inline]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Current sort.
    #[inline]
    pub const fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Current pagination.
    #[inline]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Total number of rows in the source.
    pub fn count(&self) -> Result<u64, S::Error> {
        self.source.count()
    }

    /// Rows of the current page.
    pub fn read(&self) -> Result<Vec<S::Row>, S::Error> {
        self.fetch(self.pagination.window())
    }

    /// First row of the current page, if any.
    pub fn read_one(&self) -> Result<Option<S::Row>, S::Error> {
        let rows = self.fetch(self.pagination.window().first_row())?;
        Ok(rows.into_iter().next())
    }

    /// Number of pages for the current page size.
    pub fn total_pages(&self) -> Result<u64, S::Error> {
        let total = self.source.count()?;
        Ok(self.pagination.with_total_count(total).total_pages())
    }

    fn fetch(&self, window: PageWindow) -> Result<Vec<S::Row>, S::Error> {
        let order_by = self.sort.orders();
        tracing::debug!(
            limit = window.limit,
            offset = window.offset,
            order_terms = order_by.len(),
            "reading page"
        );
        self.source.fetch_page(window, &order_by)
    }
}

impl<S> DataProvider<S>
where
    S: DataSource,
    S::Row: Fields,
{
    /// Keys of the rows in the current page.
    pub fn keys(&self) -> Result<Vec<Value>, S::Error> {
        let rows = self.read()?;
        Ok(self.keys_for(&rows))
    }

    /// Keys for rows already read, by position.
    pub fn keys_for(&self, rows: &[S::Row]) -> Vec<Value> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| self.key_of(row, index))
            .collect()
    }

    fn key_of(&self, row: &S::Row, index: usize) -> Value {
        self.key
            .select(row)
            .unwrap_or_else(|| self.source.default_key(row, index))
    }

    /// Read the current page and iterate over `(key, row)` pairs.
    ///
    /// Unlike [`page`](Self::page), the source is not counted.
    pub fn iter_page(
        &self,
    ) -> Result<Zip<vec::IntoIter<Value>, vec::IntoIter<S::Row>>, S::Error> {
        let rows = self.read()?;
        let keys = self.keys_for(&rows);
        Ok(keys.into_iter().zip(rows))
    }

    /// Count, read and key the current page in one call.
    pub fn page(&self) -> Result<Page<S::Row>, S::Error> {
        let total = self.source.count()?;
        let rows = self.read()?;
        let keys = self.keys_for(&rows);

        Ok(Page {
            rows,
            keys,
            info: PageInfo::from(self.pagination.with_total_count(total)),
        })
    }
}
