// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Copy-on-write `with_*` methods
#![allow(clippy::must_use_candidate)] // Fluent API doesn't need must_use
#![allow(clippy::match_same_arms)] // Intentional for clarity in some match expressions
#![allow(clippy::cast_precision_loss)] // Integer/float comparison in Value ordering
#![allow(clippy::double_must_use)] // Functions returning must_use types can have their own docs

//! # data-provider - Sorting and Pagination for Tabular Data
//!
//! Turns request parameters such as `?sort=-age,name&page=2&per-page=20` into
//! an ordered, windowed read against any backing store.
//!
//! - [`Sort`] declares sortable columns, decodes the sort directive, maps
//!   logical columns to physical ORDER BY terms and renders toggle links.
//! - [`Pagination`] validates page size and page number and produces the
//!   LIMIT/OFFSET window.
//! - [`DataProvider`] composes both over a [`DataSource`] and returns rows,
//!   row keys and page metadata.
//!
//! ## Quick Start
//!
//! ```
//! use data_provider::prelude::*;
//! use serde_json::json;
//!
//! let users = ArraySource::from_json(json!([
//!     {"id": 1, "username": "admin", "age": 40},
//!     {"id": 2, "username": "user", "age": 25},
//!     {"id": 3, "username": "guest", "age": 25},
//! ]));
//!
//! let sort = Sort::new()
//!     .with_columns(["username", "age"])
//!     .with_multi_sort(true)
//!     .with_directive("age,-username");
//!
//! let provider = DataProvider::new(users)
//!     .with_sort(sort)
//!     .with_pagination(Pagination::new().with_page_size(2)?)
//!     .with_key(KeySelector::field("id")?);
//!
//! let page = provider.page().unwrap();
//! assert_eq!(page.keys, [Value::Int(2), Value::Int(3)]);
//! assert_eq!(page.info.total_pages, 2);
//!
//! // Toggle links keep the other active column
//! assert_eq!(provider.sort().sort_link("age")?, "-age,-username");
//! # Ok::<(), data_provider::Error>(())
//! ```
//!
//! ## SQL Sources
//!
//! With the default `sqlite` feature, [`SqlSource`], [`QuerySource`] and
//! [`ModelSource`] read from a `rusqlite` connection. Other engines can use
//! [`build_order_by_and_limit`] with the [`Postgres`] or [`MySql`] dialect.
//!
//! ```
//! use data_provider::{Direction, OrderBy, PageWindow, Postgres, build_order_by_and_limit};
//!
//! let order_by: OrderBy = [("created_at", Direction::Desc)].into_iter().collect();
//! let sql = build_order_by_and_limit(
//!     &Postgres,
//!     "SELECT * FROM posts",
//!     &order_by,
//!     PageWindow::for_page(20, 1),
//! );
//! assert_eq!(sql, "SELECT * FROM posts ORDER BY created_at DESC LIMIT 20 OFFSET 0");
//! ```

mod config;
pub mod constants;
mod dialect;
mod error;
mod pagination;
mod provider;
mod sort;
mod value;

use indexmap::IndexMap;

/// Request parameters: name to raw value, in request order.
pub type Params = IndexMap<String, String>;

pub use config::{PaginationConfig, ProviderConfig, SortConfig};
pub use dialect::{
    Dialect, MySql, Postgres, Sqlite, build_order_by_and_limit, is_valid_sql_identifier,
};
pub use error::{Error, Result};
pub use pagination::{PageInfo, PageWindow, Pagination};
pub use provider::{ArraySource, DataProvider, DataSource, KeySelector, Page};
#[cfg(feature = "sqlite")]
pub use provider::{Model, ModelSource, QuerySource, SqlSource};
pub use sort::{
    Column, ColumnOrders, Direction, OrderBy, OrderMapping, OrderTerm, Sort, encode_directive,
    is_encodable_name, parse_directive,
};
pub use value::{Fields, Record, Value, records_from_json};

/// Prelude module for convenient imports.
///
/// ```
/// use data_provider::prelude::*;
///
/// let sort = Sort::new().with_column(Column::new("name").with_default(Direction::Desc));
/// assert_eq!(sort.sort_link("name").unwrap(), "-name");
/// ```
pub mod prelude {
    pub use crate::{
        ArraySource, Column, DataProvider, DataSource, Direction, Error, Fields, KeySelector,
        OrderBy, Page, PageInfo, Pagination, Params, ProviderConfig, Record, Sort, Value,
    };
    #[cfg(feature = "sqlite")]
    pub use crate::{Model, ModelSource, QuerySource, SqlSource};
}
