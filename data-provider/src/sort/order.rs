//! Flattened physical ordering.

use super::{Direction, OrderMapping};

/// One entry of a physical ORDER BY list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderTerm {
    /// A physical field sorted in a direction.
    Field {
        /// Physical field name.
        name: String,
        /// Sort direction.
        direction: Direction,
    },
    /// A raw ORDER BY fragment, emitted verbatim.
    Expression(String),
}

/// Physical ORDER BY list produced by [`Sort::orders`](crate::Sort::orders).
///
/// Field terms are unique by name: pushing a field that is already present
/// updates its direction in place. Expressions are appended positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    terms: Vec<OrderTerm>,
}

impl OrderBy {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a field term, or update the direction of an existing one.
    pub fn push_field(&mut self, name: impl Into<String>, direction: Direction) {
        let name = name.into();
        let existing = self.terms.iter_mut().find_map(|term| match term {
            OrderTerm::Field { name: n, direction: d } if *n == name => Some(d),
            _ => None,
        });

        match existing {
            Some(dir) => *dir = direction,
            None => self.terms.push(OrderTerm::Field { name, direction }),
        }
    }

    /// Append a raw expression.
    pub fn push_expression(&mut self, expression: impl Into<String>) {
        self.terms.push(OrderTerm::Expression(expression.into()));
    }

    /// Append every term of a column mapping.
    pub fn extend_mapping(&mut self, mapping: &OrderMapping) {
        match mapping {
            OrderMapping::Fields(fields) => {
                for (name, dir) in fields {
                    self.push_field(name.as_str(), *dir);
                }
            },
            OrderMapping::Expression(expr) => self.push_expression(expr.as_str()),
        }
    }

    /// All terms in priority order.
    #[inline]
    pub fn terms(&self) -> &[OrderTerm] {
        &self.terms
    }

    /// Iterate over the terms in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, OrderTerm> {
        self.terms.iter()
    }

    /// Only the field terms, in priority order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Direction)> {
        self.terms.iter().filter_map(|term| match term {
            OrderTerm::Field { name, direction } => Some((name.as_str(), *direction)),
            OrderTerm::Expression(_) => None,
        })
    }

    /// Direction of a physical field, if it is part of the list.
    pub fn direction_of(&self, field: &str) -> Option<Direction> {
        self.fields().find(|(name, _)| *name == field).map(|(_, dir)| dir)
    }

    /// Returns `true` if any term is a raw expression.
    pub fn has_expressions(&self) -> bool {
        self.terms
            .iter()
            .any(|term| matches!(term, OrderTerm::Expression(_)))
    }

    /// Number of terms.
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if there is nothing to order by.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<'a> IntoIterator for &'a OrderBy {
    type Item = &'a OrderTerm;
    type IntoIter = std::slice::Iter<'a, OrderTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, Direction)> for OrderBy {
    fn from_iter<I: IntoIterator<Item = (S, Direction)>>(iter: I) -> Self {
        let mut order = Self::new();
        for (name, dir) in iter {
            order.push_field(name, dir);
        }
        order
    }
}
