//! Row key extraction.

use std::fmt;
use std::sync::Arc;

use crate::{Error, Fields, Result, Value};

type KeyFn<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// How a provider derives the key of each row it returns.
///
/// Built through [`field`](Self::field), [`func`](Self::func) or
/// [`Default`], which lets the source decide: the positional index within
/// the page, or the primary key for sources that know one.
pub struct KeySelector<R> {
    kind: Kind<R>,
}

enum Kind<R> {
    Default,
    Field(String),
    Func(KeyFn<R>),
}

impl<R> KeySelector<R> {
    /// Select keys by field name. Rows without the field yield
    /// [`Value::Null`].
    ///
    /// ```
    /// use data_provider::{Error, KeySelector, Record};
    ///
    /// assert!(KeySelector::<Record>::field("id").is_ok());
    /// assert!(matches!(
    ///     KeySelector::<Record>::field("  "),
    ///     Err(Error::InvalidKeySelector(_))
    /// ));
    /// ```
    pub fn field(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() || name.chars().any(char::is_control) {
            return Err(Error::InvalidKeySelector(format!(
                "field name {name:?} cannot address a row field"
            )));
        }
        Ok(Self {
            kind: Kind::Field(name),
        })
    }

    /// Select keys with a function of the row.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        Self {
            kind: Kind::Func(Arc::new(f)),
        }
    }

    /// Name of the selected field, for field selectors.
    pub fn field_name(&self) -> Option<&str> {
        match &self.kind {
            Kind::Field(name) => Some(name),
            Kind::Default | Kind::Func(_) => None,
        }
    }

    /// Key of `row`, or `None` when the source should decide.
    pub(crate) fn select(&self, row: &R) -> Option<Value>
    where
        R: Fields,
    {
        match &self.kind {
            Kind::Default => None,
            Kind::Field(name) => Some(row.field(name).unwrap_or(Value::Null)),
            Kind::Func(f) => Some(f(row)),
        }
    }
}

impl<R> Default for KeySelector<R> {
    fn default() -> Self {
        Self {
            kind: Kind::Default,
        }
    }
}

impl<R> Clone for KeySelector<R> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            Kind::Default => Kind::Default,
            Kind::Field(name) => Kind::Field(name.clone()),
            Kind::Func(f) => Kind::Func(Arc::clone(f)),
        };
        Self { kind }
    }
}

impl<R> fmt::Debug for KeySelector<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Default => f.write_str("Default"),
            Kind::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Kind::Func(_) => f.write_str("Func(..)"),
        }
    }
}
