//! End-to-end tests for the `SQLite` sources.
//!
//! Each test builds an in-memory database with three users and reads it
//! through a [`DataProvider`] the way a request handler would.

#![cfg(feature = "sqlite")]

use data_provider::prelude::*;
use data_provider::{Direction, KeySelector, PaginationConfig};
use rusqlite::{Connection, Row};

// =============================================================================
// Fixtures
// =============================================================================

fn connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE user (
             id INTEGER PRIMARY KEY,
             username TEXT NOT NULL,
             email TEXT NOT NULL,
             status INTEGER NOT NULL
         );
         INSERT INTO user (id, username, email, status) VALUES
             (1, 'admin', 'admin@example.com', 1),
             (2, 'user', 'user@example.com', 1),
             (3, 'guest', 'guest@example.com', 0);",
    )
    .unwrap();
    conn
}

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: i64,
    username: String,
    email: String,
}

impl Fields for User {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.into()),
            "username" => Some(self.username.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            _ => None,
        }
    }
}

impl Model for User {
    const TABLE: &'static str = "user";
    const COLUMNS: &'static [&'static str] = &["id", "username", "email"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            email: row.get("email")?,
        })
    }
}

fn usernames(rows: &[Record]) -> Vec<String> {
    rows.iter()
        .map(|r| match r.get("username") {
            Some(Value::String(s)) => s.clone(),
            other => panic!("unexpected username {other:?}"),
        })
        .collect()
}

// =============================================================================
// Raw SQL
// =============================================================================

#[test]
fn sql_source_sorts_and_pages() {
    let conn = connection();
    let sort = Sort::new()
        .with_columns(["id", "username"])
        .with_directive("-username");
    let provider = DataProvider::new(SqlSource::new(&conn, "SELECT * FROM user"))
        .with_sort(sort)
        .with_pagination(Pagination::new().with_page_size(2).unwrap());

    assert_eq!(provider.count().unwrap(), 3);
    assert_eq!(usernames(&provider.read().unwrap()), ["user", "guest"]);

    let last = provider.with_page(2).unwrap();
    assert_eq!(usernames(&last.read().unwrap()), ["admin"]);
}

#[test]
fn sql_source_with_params_and_key() {
    let conn = connection();
    let source = SqlSource::new(&conn, "SELECT id, username FROM user WHERE status = ?1")
        .with_params([1]);
    let provider = DataProvider::new(source)
        .with_sort(Sort::new().with_default_order([("id", Direction::Desc)]))
        .with_key(KeySelector::field("username").unwrap());

    let page = provider.page().unwrap();
    assert_eq!(page.info.total_count, 2);
    assert_eq!(page.keys, [Value::from("user"), Value::from("admin")]);
}

#[test]
fn sql_source_expression_column() {
    let conn = connection();
    let sort = Sort::new()
        .with_column(
            Column::new("name_length")
                .asc_expr("LENGTH(username) ASC, id ASC")
                .desc_expr("LENGTH(username) DESC, id DESC"),
        )
        .with_directive("-name_length");
    let provider =
        DataProvider::new(SqlSource::new(&conn, "SELECT * FROM user")).with_sort(sort);

    assert_eq!(
        usernames(&provider.read().unwrap()),
        ["guest", "admin", "user"]
    );
}

#[test]
fn sql_errors_are_returned() {
    let conn = connection();
    let provider = DataProvider::new(SqlSource::new(&conn, "SELECT * FROM missing"));
    assert!(provider.read().is_err());
    assert!(provider.page().is_err());
}

// =============================================================================
// Query builder
// =============================================================================

#[test]
fn query_source_composite_column() {
    let conn = connection();
    conn.execute("INSERT INTO user VALUES (4, 'admin', 'root@example.com', 1)", [])
        .unwrap();

    let sort = Sort::new()
        .with_column(Column::composite("login", ["username", "email"]))
        .with_directive("login");
    let provider = DataProvider::new(
        QuerySource::new(&conn, "user").select(["id", "username", "email"]),
    )
    .with_sort(sort)
    .with_key(KeySelector::field("id").unwrap());

    assert_eq!(
        provider.keys().unwrap(),
        [Value::Int(1), Value::Int(4), Value::Int(3), Value::Int(2)]
    );
}

#[test]
fn query_source_filter_counts() {
    let conn = connection();
    let provider = DataProvider::new(QuerySource::new(&conn, "user").filter("status = ?1", [0]));
    assert_eq!(provider.count().unwrap(), 1);
    assert_eq!(provider.total_pages().unwrap(), 1);
    assert_eq!(usernames(&provider.read().unwrap()), ["guest"]);
}

// =============================================================================
// Models
// =============================================================================

#[test]
fn model_source_keys_by_primary_key() {
    let conn = connection();
    let provider = DataProvider::new(ModelSource::<User>::new(&conn))
        .with_sort(ModelSource::<User>::sort().with_directive("username"))
        .with_pagination(Pagination::new().with_page_size(2).unwrap());

    let page = provider.page().unwrap();
    let names: Vec<_> = page.rows.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["admin", "guest"]);
    assert_eq!(page.keys, [Value::Int(1), Value::Int(3)]);
    assert!(page.info.has_next);
}

#[test]
fn model_source_read_one() {
    let conn = connection();
    let provider = DataProvider::new(ModelSource::<User>::new(&conn))
        .with_sort(ModelSource::<User>::sort().with_directive("-id"));

    let user = provider.read_one().unwrap().unwrap();
    assert_eq!(user.username, "guest");
}

#[test]
fn model_source_unknown_sort_falls_back() {
    let conn = connection();
    let sort = ModelSource::<User>::sort()
        .with_default_order([("email", Direction::Desc)])
        .with_directive("password");
    let provider = DataProvider::new(ModelSource::<User>::new(&conn)).with_sort(sort);

    let rows = provider.read().unwrap();
    assert_eq!(rows[0].email, "user@example.com");
}

// =============================================================================
// Request parameters
// =============================================================================

#[test]
fn request_params_drive_the_page() {
    let conn = connection();
    let params: Params = [("sort", "username"), ("page", "2"), ("per-page", "1")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let sort = Sort::new()
        .with_columns(["id", "username"])
        .with_params(params.clone());
    let pagination = Pagination::from_params(&params, &PaginationConfig::default()).unwrap();

    let provider = DataProvider::new(SqlSource::new(&conn, "SELECT * FROM user"))
        .with_sort(sort)
        .with_pagination(pagination);

    let page = provider.page().unwrap();
    assert_eq!(usernames(&page.rows), ["guest"]);
    assert_eq!(page.info.total_pages, 3);
    assert!(page.info.has_prev);
    assert!(page.info.has_next);

    assert_eq!(provider.sort().sort_link("username").unwrap(), "-username");
    assert_eq!(
        provider.sort().sort_params("id").unwrap().get("sort"),
        Some(&"id".to_string())
    );
}

#[test]
fn every_adapter_pages_the_same_way() {
    let conn = connection();
    let by_id = || Sort::new().with_default_order([("id", Direction::Asc)]);
    let size = Pagination::new().with_page_size(2).unwrap();

    let sql = DataProvider::new(SqlSource::new(&conn, "SELECT * FROM user"))
        .with_sort(by_id())
        .with_pagination(size);
    let query = DataProvider::new(QuerySource::new(&conn, "user"))
        .with_sort(by_id())
        .with_pagination(size);
    let model = DataProvider::new(ModelSource::<User>::new(&conn))
        .with_sort(by_id())
        .with_pagination(size);

    for page in [1, 2] {
        let expected: &[&str] = if page == 1 { &["admin", "user"] } else { &["guest"] };

        let rows = sql.clone().with_page(page).unwrap().read().unwrap();
        assert_eq!(usernames(&rows), expected);

        let rows = query.clone().with_page(page).unwrap().read().unwrap();
        assert_eq!(usernames(&rows), expected);

        let rows = model.clone().with_page(page).unwrap().read().unwrap();
        let names: Vec<_> = rows.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, expected);
    }
}
