//! Typed rows read from a single table.

use std::marker::PhantomData;

use rusqlite::{Connection, Row, params_from_iter};

use super::DataSource;
use crate::{
    Column, Dialect, Fields, OrderBy, PageWindow, Sort, Sqlite, Value, build_order_by_and_limit,
};

/// A row type mapped to one table.
///
/// ```
/// use data_provider::{Fields, Model, Value};
///
/// struct User {
///     id: i64,
///     username: String,
/// }
///
/// impl Fields for User {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(self.id.into()),
///             "username" => Some(self.username.as_str().into()),
///             _ => None,
///         }
///     }
/// }
///
/// impl Model for User {
///     const TABLE: &'static str = "user";
///     const COLUMNS: &'static [&'static str] = &["id", "username"];
///
///     fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
///         Ok(Self { id: row.get("id")?, username: row.get("username")? })
///     }
/// }
/// ```
pub trait Model: Fields + Sized {
    /// Table name.
    const TABLE: &'static str;
    /// Columns selected for each row, in order.
    const COLUMNS: &'static [&'static str];
    /// Primary key columns. Composite keys list more than one.
    const PRIMARY_KEY: &'static [&'static str] = &["id"];

    /// Build a model from a row holding [`Model::COLUMNS`].
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Source that reads [`Model`] rows and keys them by primary key.
pub struct ModelSource<'c, M> {
    conn: &'c Connection,
    condition: Option<String>,
    params: Vec<Value>,
    _model: PhantomData<fn() -> M>,
}

impl<M> Clone for ModelSource<'_, M> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn,
            condition: self.condition.clone(),
            params: self.params.clone(),
            _model: PhantomData,
        }
    }
}

impl<M: Model> std::fmt::Debug for ModelSource<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSource")
            .field("table", &M::TABLE)
            .field("condition", &self.condition)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl<'c, M: Model> ModelSource<'c, M> {
    /// Every row of the model's table.
    pub const fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            condition: None,
            params: Vec::new(),
            _model: PhantomData,
        }
    }

    /// Add a WHERE condition with positional parameters.
    pub fn filter<I, V>(mut self, condition: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.condition = Some(condition.into());
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// A sort that declares every model column with its default mapping.
    pub fn sort() -> Sort {
        Sort::new().with_columns(M::COLUMNS.iter().copied().map(Column::new))
    }

    fn from_clause(&self) -> String {
        let mut sql = format!("FROM {}", Sqlite.quote_identifier(M::TABLE));
        if let Some(condition) = &self.condition {
            sql.push_str(" WHERE ");
            sql.push_str(condition);
        }
        sql
    }

    /// Rendered SELECT statement, without ordering or limits.
    pub fn to_sql(&self) -> String {
        let columns = M::COLUMNS
            .iter()
            .map(|c| Sqlite.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        format!("SELECT {columns} {}", self.from_clause())
    }
}

impl<M: Model> DataSource for ModelSource<'_, M> {
    type Row = M;
    type Error = rusqlite::Error;

    fn count(&self) -> rusqlite::Result<u64> {
        let sql = format!("SELECT COUNT(*) {}", self.from_clause());
        tracing::trace!(%sql, table = M::TABLE, "counting models");
        let n: i64 = self
            .conn
            .query_row(&sql, params_from_iter(&self.params), |row| row.get(0))?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    fn fetch_page(&self, window: PageWindow, order_by: &OrderBy) -> rusqlite::Result<Vec<M>> {
        let sql = build_order_by_and_limit(&Sqlite, &self.to_sql(), order_by, window);
        tracing::trace!(%sql, table = M::TABLE, "fetching models");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(&self.params), M::from_row)?;
        rows.collect()
    }

    /// The primary key value; an array for composite keys.
    fn default_key(&self, row: &M, _index: usize) -> Value {
        let field = |name: &str| row.field(name).unwrap_or(Value::Null);
        match M::PRIMARY_KEY {
            [single] => field(*single),
            names => Value::Array(names.iter().copied().map(field).collect()),
        }
    }
}
