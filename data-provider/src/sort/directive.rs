//! Sort directive codec.
//!
//! A directive is a single string such as `"-created_at,name"`: tokens joined
//! by a separator, each a logical column name optionally prefixed with `-`
//! for descending order.

use crate::constants::DESCENDING_PREFIX;

use super::Direction;

/// Split a directive into `(name, direction)` tokens.
///
/// Tokens are trimmed; empty tokens are skipped. Names are not checked
/// against any column list.
///
/// ```
/// use data_provider::{Direction, parse_directive};
///
/// let tokens: Vec<_> = parse_directive("age, -name,,", ',').collect();
/// assert_eq!(tokens, [("age", Direction::Asc), ("name", Direction::Desc)]);
/// ```
pub fn parse_directive(directive: &str, separator: char) -> impl Iterator<Item = (&str, Direction)> {
    directive.split(separator).filter_map(|token| {
        let token = token.trim();
        let (name, dir) = match token.strip_prefix(DESCENDING_PREFIX) {
            Some(stripped) => (stripped.trim_start(), Direction::Desc),
            None => (token, Direction::Asc),
        };
        (!name.is_empty()).then_some((name, dir))
    })
}

/// Whether `name` survives a trip through [`encode_directive`] and
/// [`parse_directive`] with `separator`.
///
/// The parser trims tokens, reads a leading `-` as the direction and splits
/// on the separator, so a name must be non-empty, carry no surrounding
/// whitespace, not start with `-` and not contain the separator.
///
/// ```
/// use data_provider::is_encodable_name;
///
/// assert!(is_encodable_name("created_at", ','));
/// assert!(!is_encodable_name(" age", ','));
/// assert!(!is_encodable_name("-x", ','));
/// assert!(!is_encodable_name("a,b", ','));
/// assert!(is_encodable_name("a,b", '|'));
/// ```
pub fn is_encodable_name(name: &str, separator: char) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.starts_with(DESCENDING_PREFIX)
        && !name.contains(separator)
}

/// Join `(name, direction)` pairs into a directive.
///
/// ```
/// use data_provider::{Direction, encode_directive};
///
/// let directive = encode_directive([("age", Direction::Desc), ("name", Direction::Asc)], '|');
/// assert_eq!(directive, "-age|name");
/// ```
pub fn encode_directive<'a, I>(orders: I, separator: char) -> String
where
    I: IntoIterator<Item = (&'a str, Direction)>,
{
    let mut out = String::new();
    for (i, (name, dir)) in orders.into_iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        if dir.is_descending() {
            out.push(DESCENDING_PREFIX);
        }
        out.push_str(name);
    }
    out
}
