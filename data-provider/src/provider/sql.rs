//! `SQLite` sources: raw SQL and table queries.

use rusqlite::{Connection, Row, params_from_iter};

use super::DataSource;
use crate::{Dialect, OrderBy, PageWindow, Record, Sqlite, Value, build_order_by_and_limit};

/// Read a result row into a record, keyed by column name.
fn record_from_row(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<Record> {
    columns
        .iter()
        .enumerate()
        .map(|(i, name)| Ok::<_, rusqlite::Error>((name.clone(), Value::from(row.get_ref(i)?))))
        .collect()
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

/// Rows produced by a caller-supplied SELECT statement.
///
/// Counting wraps the statement in `SELECT COUNT(*) FROM (...)`; reading
/// appends ORDER BY and LIMIT/OFFSET. The statement must not carry its own
/// ORDER BY or LIMIT. Bound parameters are positional (`?1`, `?2`, ...).
#[derive(Debug, Clone)]
pub struct SqlSource<'c> {
    conn: &'c Connection,
    sql: String,
    params: Vec<Value>,
}

impl<'c> SqlSource<'c> {
    /// Source over `sql`, with no bound parameters.
    pub fn new(conn: &'c Connection, sql: impl Into<String>) -> Self {
        Self {
            conn,
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind positional parameters.
    pub fn with_params<I, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// The base statement.
    #[inline]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Statement used to count rows.
    pub fn count_sql(&self) -> String {
        let base = self.sql.trim_end().trim_end_matches(';');
        format!("SELECT COUNT(*) FROM ({base}) AS counted")
    }

    /// Statement used to read one window.
    pub fn page_sql(&self, window: PageWindow, order_by: &OrderBy) -> String {
        build_order_by_and_limit(&Sqlite, &self.sql, order_by, window)
    }
}

impl DataSource for SqlSource<'_> {
    type Row = Record;
    type Error = rusqlite::Error;

    fn count(&self) -> rusqlite::Result<u64> {
        let sql = self.count_sql();
        tracing::trace!(%sql, "counting rows");
        let n: i64 = self
            .conn
            .query_row(&sql, params_from_iter(&self.params), |row| row.get(0))?;
        Ok(to_count(n))
    }

    fn fetch_page(&self, window: PageWindow, order_by: &OrderBy) -> rusqlite::Result<Vec<Record>> {
        let sql = self.page_sql(window, order_by);
        tracing::trace!(%sql, "fetching rows");

        let mut stmt = self.conn.prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let rows = stmt.query_map(params_from_iter(&self.params), |row| {
            record_from_row(row, &columns)
        })?;
        rows.collect()
    }
}

/// Rows of one table, optionally filtered.
///
/// A thin query builder over [`SqlSource`]: it renders
/// `SELECT <columns> FROM <table> [WHERE <condition>]` and delegates.
#[derive(Debug, Clone)]
pub struct QuerySource<'c> {
    conn: &'c Connection,
    table: String,
    columns: Vec<String>,
    condition: Option<String>,
    params: Vec<Value>,
}

impl<'c> QuerySource<'c> {
    /// Every column of `table`.
    pub fn new(conn: &'c Connection, table: impl Into<String>) -> Self {
        Self {
            conn,
            table: table.into(),
            columns: Vec::new(),
            condition: None,
            params: Vec::new(),
        }
    }

    /// Restrict the selected columns.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
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

    /// Rendered SELECT statement, without ordering or limits.
    pub fn to_sql(&self) -> String {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| Sqlite.quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut sql = format!(
            "SELECT {columns} FROM {}",
            Sqlite.quote_identifier(&self.table)
        );
        if let Some(condition) = &self.condition {
            sql.push_str(" WHERE ");
            sql.push_str(condition);
        }
        sql
    }

    fn inner(&self) -> SqlSource<'c> {
        SqlSource::new(self.conn, self.to_sql()).with_params(self.params.iter().cloned())
    }
}

impl DataSource for QuerySource<'_> {
    type Row = Record;
    type Error = rusqlite::Error;

    fn count(&self) -> rusqlite::Result<u64> {
        self.inner().count()
    }

    fn fetch_page(&self, window: PageWindow, order_by: &OrderBy) -> rusqlite::Result<Vec<Record>> {
        self.inner().fetch_page(window, order_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE item (id INTEGER PRIMARY KEY, name TEXT, price REAL);
             INSERT INTO item VALUES (1, 'pen', 1.5), (2, 'book', 12.0), (3, 'cup', 4.25);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_count_sql() {
        let conn = conn();
        let source = SqlSource::new(&conn, "SELECT * FROM item;");
        assert_eq!(
            source.count_sql(),
            "SELECT COUNT(*) FROM (SELECT * FROM item) AS counted"
        );
        assert_eq!(source.count().unwrap(), 3);
    }

    #[test]
    fn test_sql_source_reads_records() {
        let conn = conn();
        let source = SqlSource::new(&conn, "SELECT id, name, price FROM item WHERE price > ?1")
            .with_params([2.0]);

        assert_eq!(source.count().unwrap(), 2);

        let order_by: OrderBy = [("price", Direction::Desc)].into_iter().collect();
        let rows = source
            .fetch_page(PageWindow::for_page(10, 1), &order_by)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], Value::from("book"));
        assert_eq!(rows[1]["price"], Value::Float(4.25));
        assert_eq!(
            rows[0].keys().collect::<Vec<_>>(),
            ["id", "name", "price"]
        );
    }

    #[test]
    fn test_query_source_sql() {
        let conn = conn();
        let query = QuerySource::new(&conn, "item")
            .select(["id", "display name"])
            .filter("id > ?1", [1]);
        assert_eq!(
            query.to_sql(),
            "SELECT id, \"display name\" FROM item WHERE id > ?1"
        );
        assert_eq!(
            QuerySource::new(&conn, "item").to_sql(),
            "SELECT * FROM item"
        );
    }

    #[test]
    fn test_query_source_reads() {
        let conn = conn();
        let query = QuerySource::new(&conn, "item")
            .select(["id", "name"])
            .filter("price < ?1", [10]);

        assert_eq!(query.count().unwrap(), 2);

        let order_by: OrderBy = [("name", Direction::Asc)].into_iter().collect();
        let rows = query
            .fetch_page(PageWindow::from_row_offset(1, 1), &order_by)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], Value::from("pen"));
    }

    #[test]
    fn test_sql_errors_surface() {
        let conn = conn();
        let source = SqlSource::new(&conn, "SELECT * FROM missing");
        assert!(source.count().is_err());
        assert!(
            source
                .fetch_page(PageWindow::for_page(1, 1), &OrderBy::new())
                .is_err()
        );
    }
}
