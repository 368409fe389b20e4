//! Row values, associative records and field access.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

/// A single field value read from a row, or a key derived from one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or SQL NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Text.
    String(String),
    /// Composite values such as multi-column primary keys.
    Array(Vec<Value>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::String(_) => 3,
            Self::Array(_) => 4,
        }
    }

    /// Total ordering used by in-memory sorting.
    ///
    /// Values of different kinds order as
    /// `Null < Bool < numbers < String < Array`. Integers and floats compare
    /// numerically with each other.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Array(a), Self::Array(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.compare(y))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match v {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            // Nested documents are kept as their JSON text
            obj @ Json::Object(_) => Self::String(obj.to_string()),
        }
    }
}

/// An associative row: field name to value, in column order.
pub type Record = IndexMap<String, Value>;

/// Read access to named fields of a row.
///
/// Used by in-memory sorting and by field-based key selectors. Typed models
/// implement it to expose their attributes by name.
pub trait Fields {
    /// Value of the named field, or `None` if the row has no such field.
    fn field(&self, name: &str) -> Option<Value>;
}

impl Fields for Record {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Fields for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned().map(Value::from)
    }
}

/// Convert a JSON document into records.
///
/// An array of objects yields one record per object; a single object yields
/// one record. Anything else is skipped.
pub fn records_from_json(json: serde_json::Value) -> Vec<Record> {
    use serde_json::Value as Json;

    fn record(map: serde_json::Map<String, Json>) -> Record {
        map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
    }

    match json {
        Json::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Json::Object(map) => Some(record(map)),
                other => {
                    tracing::debug!(row = %other, "skipping non-object row");
                    None
                },
            })
            .collect(),
        Json::Object(map) => vec![record(map)],
        other => {
            tracing::debug!(document = %other, "json document holds no rows");
            Vec::new()
        },
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

    use super::Value;

    impl ToSql for Value {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(match self {
                Self::Null => ToSqlOutput::Owned(SqlValue::Null),
                Self::Bool(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
                Self::Int(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
                Self::Float(f) => ToSqlOutput::Owned(SqlValue::Real(*f)),
                Self::String(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
                Self::Array(_) => {
                    return Err(rusqlite::Error::ToSqlConversionFailure(
                        "array values cannot be bound as SQL parameters".into(),
                    ));
                },
            })
        }
    }

    impl From<ValueRef<'_>> for Value {
        fn from(v: ValueRef<'_>) -> Self {
            match v {
                ValueRef::Null => Self::Null,
                ValueRef::Integer(i) => Self::Int(i),
                ValueRef::Real(f) => Self::Float(f),
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                    Self::String(String::from_utf8_lossy(bytes).into_owned())
                },
            }
        }
    }
}
