//! SQL dialects for Postgres, `SQLite` and `MySQL`.
//!
//! A dialect only decides how identifiers are quoted and how a LIMIT/OFFSET
//! clause is spelled. [`build_order_by_and_limit`] combines both with an
//! [`OrderBy`] to finish a caller-supplied query.

use crate::{OrderBy, OrderTerm, PageWindow};

/// Maximum length for SQL identifiers (`PostgreSQL` limit is 63).
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Whether `s` can be emitted as an identifier without quoting.
///
/// A plain identifier starts with an ASCII letter or underscore, continues
/// with ASCII letters, digits or underscores, and is at most 63 characters.
///
/// ```
/// use data_provider::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("users"));
/// assert!(is_valid_sql_identifier("_private"));
/// assert!(!is_valid_sql_identifier("123abc"));
/// assert!(!is_valid_sql_identifier("user-name"));
/// assert!(!is_valid_sql_identifier("user.id"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_sql_identifier(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_IDENTIFIER_LENGTH {
        return false;
    }

    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Plain identifier, optionally qualified (`users.name`).
fn is_plain_reference(s: &str) -> bool {
    s.split('.').all(is_valid_sql_identifier)
}

/// Saturate to the largest value every engine accepts in LIMIT/OFFSET.
fn bound(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// SQL dialect trait for database-specific syntax.
pub trait Dialect: Clone + Copy {
    /// Character used to delimit quoted identifiers.
    fn quote_char(&self) -> char;

    /// Render a column reference.
    ///
    /// Plain and dotted identifiers pass through unchanged; anything else is
    /// wrapped in quotes with embedded quote characters doubled.
    fn quote_identifier(&self, name: &str) -> String {
        if is_plain_reference(name) {
            return name.to_string();
        }
        let q = self.quote_char();
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    /// Format the LIMIT/OFFSET clause for a window.
    fn limit_offset(&self, window: PageWindow) -> String {
        format!(
            "LIMIT {} OFFSET {}",
            bound(window.limit),
            bound(window.offset)
        )
    }

    /// Comma-separated ORDER BY list, or `None` when there is nothing to sort
    /// by. Expressions are emitted verbatim.
    fn order_by_list(&self, order_by: &OrderBy) -> Option<String> {
        if order_by.is_empty() {
            return None;
        }
        let terms: Vec<String> = order_by
            .iter()
            .map(|term| match term {
                OrderTerm::Field { name, direction } => {
                    format!("{} {}", self.quote_identifier(name), direction.as_sql())
                },
                OrderTerm::Expression(expression) => expression.clone(),
            })
            .collect();
        Some(terms.join(", "))
    }
}

/// Postgres dialect.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::exhaustive_structs)]
pub struct Postgres;

impl Dialect for Postgres {
    #[inline]
    fn quote_char(&self) -> char {
        '"'
    }
}

/// `SQLite` dialect.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::exhaustive_structs)]
pub struct Sqlite;

impl Dialect for Sqlite {
    #[inline]
    fn quote_char(&self) -> char {
        '"'
    }
}

/// `MySQL` dialect.
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::exhaustive_structs)]
pub struct MySql;

impl Dialect for MySql {
    #[inline]
    fn quote_char(&self) -> char {
        '`'
    }

    fn limit_offset(&self, window: PageWindow) -> String {
        format!("LIMIT {}, {}", bound(window.offset), bound(window.limit))
    }
}

/// Append ORDER BY and LIMIT/OFFSET clauses to `sql`.
///
/// Trailing whitespace and semicolons are stripped first. The query must not
/// already carry its own ORDER BY or LIMIT.
///
/// ```
/// use data_provider::{Direction, OrderBy, PageWindow, Sqlite, build_order_by_and_limit};
///
/// let order_by: OrderBy = [("name", Direction::Asc)].into_iter().collect();
/// let sql = build_order_by_and_limit(
///     &Sqlite,
///     "SELECT * FROM users;",
///     &order_by,
///     PageWindow::for_page(10, 2),
/// );
/// assert_eq!(sql, "SELECT * FROM users ORDER BY name ASC LIMIT 10 OFFSET 10");
/// ```
pub fn build_order_by_and_limit<D: Dialect>(
    dialect: &D,
    sql: &str,
    order_by: &OrderBy,
    window: PageWindow,
) -> String {
    let mut out = sql
        .trim_end()
        .trim_end_matches(';')
        .trim_end()
        .to_string();

    if let Some(list) = dialect.order_by_list(order_by) {
        out.push_str(" ORDER BY ");
        out.push_str(&list);
    }
    out.push(' ');
    out.push_str(&dialect.limit_offset(window));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn order(terms: &[(&str, Direction)]) -> OrderBy {
        terms.iter().map(|(n, d)| (*n, *d)).collect()
    }

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_sql_identifier("users"));
        assert!(is_valid_sql_identifier("user_id"));
        assert!(is_valid_sql_identifier("Table123"));
        assert!(is_valid_sql_identifier(&"a".repeat(63)));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_sql_identifier(""));
        assert!(!is_valid_sql_identifier("1abc"));
        assert!(!is_valid_sql_identifier("user name"));
        assert!(!is_valid_sql_identifier("user; DROP"));
        assert!(!is_valid_sql_identifier("ñame"));
        assert!(!is_valid_sql_identifier(&"a".repeat(64)));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(Sqlite.quote_identifier("name"), "name");
        assert_eq!(Postgres.quote_identifier("users.name"), "users.name");
        assert_eq!(Postgres.quote_identifier("first name"), "\"first name\"");
        assert_eq!(Sqlite.quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(MySql.quote_identifier("order-date"), "`order-date`");
        assert_eq!(MySql.quote_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_limit_offset() {
        let window = PageWindow::for_page(20, 3);
        assert_eq!(Postgres.limit_offset(window), "LIMIT 20 OFFSET 40");
        assert_eq!(Sqlite.limit_offset(window), "LIMIT 20 OFFSET 40");
        assert_eq!(MySql.limit_offset(window), "LIMIT 40, 20");
    }

    #[test]
    fn test_limit_saturates() {
        let window = PageWindow::from_row_offset(u64::MAX, 0);
        assert_eq!(
            Sqlite.limit_offset(window),
            "LIMIT 9223372036854775807 OFFSET 0"
        );
    }

    #[test]
    fn test_order_by_list_empty() {
        assert_eq!(Sqlite.order_by_list(&OrderBy::new()), None);
    }

    #[test]
    fn test_build_multi_column() {
        let order_by = order(&[("age", Direction::Desc), ("name", Direction::Asc)]);
        let sql = build_order_by_and_limit(
            &Postgres,
            "SELECT * FROM users",
            &order_by,
            PageWindow::for_page(10, 1),
        );
        insta::assert_snapshot!(sql, @"SELECT * FROM users ORDER BY age DESC, name ASC LIMIT 10 OFFSET 0");
    }

    #[test]
    fn test_build_with_expression() {
        let mut order_by = order(&[("status", Direction::Asc)]);
        order_by.push_expression("LENGTH(name) DESC");
        let sql = build_order_by_and_limit(
            &MySql,
            "SELECT * FROM `users`  ;  ",
            &order_by,
            PageWindow::from_row_offset(5, 15),
        );
        insta::assert_snapshot!(sql, @"SELECT * FROM `users` ORDER BY status ASC, LENGTH(name) DESC LIMIT 15, 5");
    }

    #[test]
    fn test_build_without_order() {
        let sql = build_order_by_and_limit(
            &Sqlite,
            "SELECT id FROM t",
            &OrderBy::new(),
            PageWindow::for_page(2, 2),
        );
        insta::assert_snapshot!(sql, @"SELECT id FROM t LIMIT 2 OFFSET 2");
    }

    #[test]
    fn test_dialect_debug() {
        let (pg, sqlite, mysql) = (Postgres, Sqlite, MySql);
        assert_eq!(format!("{pg:?}"), "Postgres");
        assert_eq!(format!("{sqlite:?}"), "Sqlite");
        assert_eq!(format!("{mysql:?}"), "MySql");
    }
}
