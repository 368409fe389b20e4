//! In-memory source over a vector of rows.

use std::cmp::Ordering;
use std::convert::Infallible;

use super::DataSource;
use crate::{Direction, Fields, OrderBy, PageWindow, Record, Value, records_from_json};

/// Rows held in memory, sorted and sliced on every read.
///
/// Only field terms are applied; raw SQL expressions in an [`OrderBy`] have
/// no meaning here and are skipped with a warning. Sorting is stable, so rows
/// that compare equal keep their original order. Missing fields sort as
/// [`Value::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArraySource<R> {
    rows: Vec<R>,
}

impl<R> ArraySource<R> {
    /// Wrap a set of rows.
    pub const fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    /// All rows, unsorted.
    #[inline]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Take the rows back.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl ArraySource<Record> {
    /// Rows from a JSON array of objects.
    pub fn from_json(json: serde_json::Value) -> Self {
        Self::new(records_from_json(json))
    }
}

impl<R> From<Vec<R>> for ArraySource<R> {
    fn from(rows: Vec<R>) -> Self {
        Self::new(rows)
    }
}

impl<R> FromIterator<R> for ArraySource<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn compare_keys(a: &[Value], b: &[Value], directions: &[Direction]) -> Ordering {
    a.iter()
        .zip(b)
        .zip(directions)
        .map(|((x, y), dir)| match dir {
            Direction::Asc => x.compare(y),
            Direction::Desc => y.compare(x),
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl<R: Fields + Clone> DataSource for ArraySource<R> {
    type Row = R;
    type Error = Infallible;

    fn count(&self) -> Result<u64, Infallible> {
        Ok(u64::try_from(self.rows.len()).unwrap_or(u64::MAX))
    }

    fn fetch_page(&self, window: PageWindow, order_by: &OrderBy) -> Result<Vec<R>, Infallible> {
        let range = window.range(self.rows.len());

        if order_by.has_expressions() {
            tracing::warn!(
                terms = order_by.len(),
                "in-memory rows cannot be ordered by SQL expressions; skipping them"
            );
        }

        let (fields, directions): (Vec<&str>, Vec<Direction>) = order_by.fields().unzip();
        if fields.is_empty() {
            return Ok(self.rows.get(range).map(<[R]>::to_vec).unwrap_or_default());
        }

        // Decorate once so each comparison does not re-read fields
        let mut keyed: Vec<(Vec<Value>, &R)> = self
            .rows
            .iter()
            .map(|row| {
                let key = fields
                    .iter()
                    .map(|name| row.field(name).unwrap_or(Value::Null))
                    .collect();
                (key, row)
            })
            .collect();
        keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, &directions));

        Ok(keyed
            .get(range)
            .unwrap_or_default()
            .iter()
            .map(|(_, row)| (*row).clone())
            .collect())
    }
}
