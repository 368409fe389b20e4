//! Sortable column definitions.

use indexmap::IndexMap;

use super::Direction;

/// How one direction of a logical column maps onto physical ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderMapping {
    /// Physical fields with their directions, in priority order.
    Fields(IndexMap<String, Direction>),
    /// A raw ORDER BY fragment passed through verbatim,
    /// e.g. `last_name DESC NULLS LAST`.
    Expression(String),
}

impl OrderMapping {
    fn single(field: &str, dir: Direction) -> Self {
        let mut fields = IndexMap::with_capacity(1);
        fields.insert(field.to_string(), dir);
        Self::Fields(fields)
    }
}

/// A logical column that callers may sort by.
///
/// A bare column sorts by the physical field of the same name:
///
/// ```
/// use data_provider::{Column, Direction, OrderMapping};
///
/// let age = Column::new("age");
/// assert_eq!(
///     age.mapping(Direction::Desc),
///     &OrderMapping::Fields([("age".to_string(), Direction::Desc)].into_iter().collect())
/// );
/// ```
///
/// Composite and expression columns decouple the public name from storage:
///
/// ```
/// use data_provider::{Column, Direction};
///
/// let name = Column::composite("name", ["first_name", "last_name"]);
/// let created = Column::new("created")
///     .asc_expr("created_at ASC NULLS FIRST")
///     .desc_expr("created_at DESC NULLS LAST")
///     .with_default(Direction::Desc);
/// # let _ = (name, created);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    asc: OrderMapping,
    desc: OrderMapping,
    default: Direction,
}

impl Column {
    /// Declare a column that sorts by the field of the same name.
    ///
    /// Any name is accepted, but sort links are only produced for names that
    /// a directive can carry (see [`is_encodable_name`](crate::is_encodable_name)).
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            asc: OrderMapping::single(&name, Direction::Asc),
            desc: OrderMapping::single(&name, Direction::Desc),
            default: Direction::Asc,
            name,
        }
    }

    /// Declare a column that sorts by several fields, all in the requested
    /// direction.
    pub fn composite<I, F>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        Self::new(name)
            .asc(fields.iter().map(|f| (f.clone(), Direction::Asc)))
            .desc(fields.into_iter().map(|f| (f, Direction::Desc)))
    }

    /// Physical fields used when the column is sorted ascending.
    pub fn asc<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (F, Direction)>,
        F: Into<String>,
    {
        self.asc = OrderMapping::Fields(fields.into_iter().map(|(f, d)| (f.into(), d)).collect());
        self
    }

    /// Physical fields used when the column is sorted descending.
    pub fn desc<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (F, Direction)>,
        F: Into<String>,
    {
        self.desc = OrderMapping::Fields(fields.into_iter().map(|(f, d)| (f.into(), d)).collect());
        self
    }

    /// Raw ORDER BY fragment used when the column is sorted ascending.
    pub fn asc_expr(mut self, expression: impl Into<String>) -> Self {
        self.asc = OrderMapping::Expression(expression.into());
        self
    }

    /// Raw ORDER BY fragment used when the column is sorted descending.
    pub fn desc_expr(mut self, expression: impl Into<String>) -> Self {
        self.desc = OrderMapping::Expression(expression.into());
        self
    }

    /// Direction applied when a sort link activates this column.
    pub fn with_default(mut self, direction: Direction) -> Self {
        self.default = direction;
        self
    }

    /// Logical name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical mapping for the given direction.
    #[inline]
    pub const fn mapping(&self, direction: Direction) -> &OrderMapping {
        match direction {
            Direction::Asc => &self.asc,
            Direction::Desc => &self.desc,
        }
    }

    /// Direction applied when a sort link activates this column.
    #[inline]
    pub const fn default_direction(&self) -> Direction {
        self.default
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
