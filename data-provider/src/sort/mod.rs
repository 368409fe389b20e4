//! Sort declaration, directive decoding and physical order resolution.
//!
//! # Example
//!
//! ```
//! use data_provider::{Column, Direction, Sort};
//!
//! let sort = Sort::new()
//!     .with_columns([Column::new("age"), Column::composite("name", ["first_name", "last_name"])])
//!     .with_multi_sort(true)
//!     .with_params([("sort", "age,-name")]);
//!
//! let orders = sort.orders();
//! let fields: Vec<_> = orders.fields().collect();
//! assert_eq!(
//!     fields,
//!     [
//!         ("age", Direction::Asc),
//!         ("first_name", Direction::Desc),
//!         ("last_name", Direction::Desc),
//!     ]
//! );
//!
//! // Link that flips `age` and keeps `name` as the secondary order
//! assert_eq!(sort.sort_link("age").unwrap(), "-age,-name");
//! ```

mod column;
mod direction;
mod directive;
mod order;

use std::cell::OnceCell;

use indexmap::IndexMap;

use crate::config::SortConfig;
use crate::constants::{DEFAULT_SEPARATOR, DEFAULT_SORT_PARAM};
use crate::{Error, Params, Result};

pub use column::{Column, OrderMapping};
pub use direction::Direction;
pub use directive::{encode_directive, is_encodable_name, parse_directive};
pub use order::{OrderBy, OrderTerm};

/// Logical column name to direction, in priority order.
pub type ColumnOrders = IndexMap<String, Direction>;

/// Sorting state for one request.
///
/// `Sort` is a value object: every `with_*` method consumes the receiver and
/// returns the updated copy. Clone first to keep the original.
///
/// Resolution of the directive is computed lazily and cached on the
/// instance; the cache is not part of equality.
#[derive(Debug, Clone)]
pub struct Sort {
    columns: IndexMap<String, Column>,
    default_order: ColumnOrders,
    params: Params,
    multi_sort: bool,
    separator: char,
    sort_param: String,
    explicit: Option<ColumnOrders>,
    resolved: OnceCell<ColumnOrders>,
}

impl Default for Sort {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Sort {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
            && self.default_order == other.default_order
            && self.params == other.params
            && self.multi_sort == other.multi_sort
            && self.separator == other.separator
            && self.sort_param == other.sort_param
            && self.explicit == other.explicit
    }
}

impl Eq for Sort {}

impl Sort {
    /// Create a sort with no columns, single-column mode, `sort` as the
    /// parameter name and `,` as the separator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
            default_order: ColumnOrders::new(),
            params: Params::new(),
            multi_sort: false,
            separator: DEFAULT_SEPARATOR,
            sort_param: DEFAULT_SORT_PARAM.to_string(),
            explicit: None,
            resolved: OnceCell::new(),
        }
    }

    /// Create a sort using the parameter name, separator and multi-sort flag
    /// from configuration.
    #[must_use]
    pub fn from_config(config: &SortConfig) -> Self {
        Self::new()
            .with_sort_param(config.param.as_str())
            .with_separator(config.separator)
            .with_multi_sort(config.multi_sort)
    }

    fn invalidate(mut self) -> Self {
        self.explicit = None;
        self.resolved = OnceCell::new();
        self
    }

    /// Declare the sortable columns, replacing any previous declaration.
    ///
    /// Accepts anything convertible to [`Column`], so bare names work:
    /// `sort.with_columns(["id", "email"])`.
    pub fn with_columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.columns = columns
            .into_iter()
            .map(|c| {
                let column = c.into();
                (column.name().to_string(), column)
            })
            .collect();
        self.invalidate()
    }

    /// Declare one more sortable column.
    pub fn with_column(mut self, column: impl Into<Column>) -> Self {
        let column = column.into();
        self.columns.insert(column.name().to_string(), column);
        self.invalidate()
    }

    /// Order used when the request carries no usable directive.
    ///
    /// Names are not checked against the declared columns.
    pub fn with_default_order<I, K>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = (K, Direction)>,
        K: Into<String>,
    {
        self.default_order = order.into_iter().map(|(k, d)| (k.into(), d)).collect();
        self.invalidate()
    }

    /// Allow more than one column to be active at once. Off by default.
    pub fn with_multi_sort(mut self, multi_sort: bool) -> Self {
        self.multi_sort = multi_sort;
        self.invalidate()
    }

    /// Character separating directive tokens.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self.invalidate()
    }

    /// Name of the request parameter holding the directive.
    pub fn with_sort_param(mut self, name: impl Into<String>) -> Self {
        self.sort_param = name.into();
        self.invalidate()
    }

    /// Raw request parameters. The directive is read from the
    /// [sort parameter](Self::sort_param).
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.invalidate()
    }

    /// Set the directive directly, keeping the other parameters.
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.params.insert(self.sort_param.clone(), directive.into());
        self.invalidate()
    }

    /// Install an explicit order instead of decoding the directive.
    ///
    /// With `validate`, undeclared columns are removed and single-column
    /// mode keeps only the first remaining entry, so a mapping of unknown
    /// columns yields an empty order. Without `validate` the mapping is used
    /// verbatim.
    pub fn with_column_orders<I, K>(mut self, orders: I, validate: bool) -> Self
    where
        I: IntoIterator<Item = (K, Direction)>,
        K: Into<String>,
    {
        let mut resolved = ColumnOrders::new();
        for (name, dir) in orders {
            let name = name.into();
            if validate && !self.columns.contains_key(&name) {
                tracing::trace!(column = %name, "dropping undeclared column order");
                continue;
            }
            resolved.insert(name, dir);
            if validate && !self.multi_sort {
                break;
            }
        }
        self.resolved = OnceCell::new();
        self.explicit = Some(resolved);
        self
    }

    /// Declared columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Definition of a declared column.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Whether `name` is a declared column.
    #[inline]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Fallback order.
    #[inline]
    pub const fn default_order(&self) -> &ColumnOrders {
        &self.default_order
    }

    /// Whether several columns may be active at once.
    #[inline]
    pub const fn is_multi_sort(&self) -> bool {
        self.multi_sort
    }

    /// Directive separator.
    #[inline]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Name of the request parameter holding the directive.
    #[inline]
    pub fn sort_param(&self) -> &str {
        &self.sort_param
    }

    /// Raw request parameters.
    #[inline]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// The directive from the request parameters, if any.
    pub fn directive(&self) -> Option<&str> {
        self.params.get(&self.sort_param).map(String::as_str)
    }

    /// Current logical order.
    ///
    /// Decodes the directive on first use and caches the result. With
    /// `recalculate`, the directive is decoded again, bypassing both the
    /// cache and any order installed by
    /// [`with_column_orders`](Self::with_column_orders).
    pub fn column_orders(&self, recalculate: bool) -> ColumnOrders {
        if recalculate {
            return self.decode();
        }
        if let Some(explicit) = &self.explicit {
            return explicit.clone();
        }
        self.resolved.get_or_init(|| self.decode()).clone()
    }

    /// Current direction of a logical column, `None` if it is not active.
    pub fn column_order(&self, name: &str) -> Option<Direction> {
        match &self.explicit {
            Some(explicit) => explicit.get(name).copied(),
            None => self.resolved.get_or_init(|| self.decode()).get(name).copied(),
        }
    }

    fn decode(&self) -> ColumnOrders {
        let mut orders = ColumnOrders::new();

        if let Some(directive) = self.directive() {
            for (name, dir) in parse_directive(directive, self.separator) {
                if !self.columns.contains_key(name) {
                    tracing::trace!(column = name, "dropping unknown sort column");
                    continue;
                }
                orders.insert(name.to_string(), dir);
                if !self.multi_sort {
                    break;
                }
            }
        }

        if orders.is_empty() {
            orders.clone_from(&self.default_order);
        }

        tracing::debug!(?orders, multi_sort = self.multi_sort, "resolved sort order");
        orders
    }

    /// Physical ORDER BY list for the current order.
    ///
    /// Each active column contributes the mapping for its direction, in
    /// priority order. Columns that were never declared (possible through the
    /// default order or an unvalidated explicit order) sort by the field of
    /// the same name.
    pub fn orders(&self) -> OrderBy {
        let mut order_by = OrderBy::new();

        for (name, dir) in &self.column_orders(false) {
            match self.columns.get(name) {
                Some(column) => order_by.extend_mapping(column.mapping(*dir)),
                None => order_by.push_field(name.as_str(), *dir),
            }
        }

        order_by
    }

    /// Directive that toggles `column`.
    ///
    /// An active column flips direction; an inactive one gets its default
    /// direction. In multi-sort mode the column becomes the primary order and
    /// the other active columns follow; otherwise it is the only one.
    ///
    /// Only names that decode back are written: active entries that are not
    /// declared columns, or that [`is_encodable_name`] rejects, are left out.
    /// Fails with [`Error::UnknownColumn`] for an undeclared `column` and
    /// [`Error::UnencodableColumn`] for a declared one whose name the
    /// directive cannot carry.
    pub fn sort_link(&self, column: &str) -> Result<String> {
        let definition = self
            .columns
            .get(column)
            .ok_or_else(|| Error::UnknownColumn(column.to_string()))?;
        if !is_encodable_name(column, self.separator) {
            return Err(Error::UnencodableColumn(column.to_string()));
        }

        let mut current = self.column_orders(false);
        let direction = current
            .shift_remove(column)
            .map_or_else(|| definition.default_direction(), Direction::reverse);
        current.retain(|name, _| self.has_column(name) && is_encodable_name(name, self.separator));

        let mut next = ColumnOrders::with_capacity(current.len() + 1);
        next.insert(column.to_string(), direction);
        if self.multi_sort {
            next.extend(current);
        }

        Ok(encode_directive(
            next.iter().map(|(name, dir)| (name.as_str(), *dir)),
            self.separator,
        ))
    }

    /// Sort links for every active declared column that a directive can
    /// carry.
    pub fn sort_links(&self) -> Result<IndexMap<String, String>> {
        self.column_orders(false)
            .keys()
            .filter(|name| self.has_column(name) && is_encodable_name(name, self.separator))
            .map(|name| Ok((name.clone(), self.sort_link(name)?)))
            .collect()
    }

    /// The current request parameters with the directive replaced by the
    /// sort link for `column`. Ready to be turned into a URL query.
    pub fn sort_params(&self, column: &str) -> Result<Params> {
        let link = self.sort_link(column)?;
        let mut params = self.params.clone();
        params.insert(self.sort_param.clone(), link);
        Ok(params)
    }
}
