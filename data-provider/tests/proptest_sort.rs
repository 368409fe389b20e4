//! Property-based tests for sort directive decoding and link generation.

use data_provider::{Direction, Error, Sort, encode_directive, is_encodable_name, parse_directive};
use proptest::prelude::*;

const COLUMNS: [&str; 4] = ["id", "name", "age", "email"];

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Asc), Just(Direction::Desc)]
}

/// Distinct declared columns with directions, in random order.
fn active_orders() -> impl Strategy<Value = Vec<(&'static str, Direction)>> {
    (
        Just(COLUMNS.to_vec()).prop_shuffle(),
        0..=COLUMNS.len(),
        proptest::collection::vec(direction(), COLUMNS.len()),
    )
        .prop_map(|(names, n, dirs)| names.into_iter().take(n).zip(dirs).collect())
}

fn sort(multi_sort: bool, orders: &[(&str, Direction)]) -> Sort {
    Sort::new()
        .with_columns(COLUMNS)
        .with_multi_sort(multi_sort)
        .with_directive(encode_directive(orders.iter().copied(), ','))
}

// =============================================================================
// Directive Decoding
// =============================================================================

proptest! {
    /// Encoding then parsing a directive preserves names and directions
    #[test]
    fn directive_round_trips(orders in active_orders()) {
        let encoded = encode_directive(orders.iter().copied(), ',');
        let decoded: Vec<_> = parse_directive(&encoded, ',').collect();
        prop_assert_eq!(decoded, orders);
    }

    /// Multi-sort decoding keeps every declared column in request order
    #[test]
    fn multi_sort_decodes_everything(orders in active_orders()) {
        let resolved = sort(true, &orders).column_orders(false);
        let resolved: Vec<_> = resolved.iter().map(|(n, d)| (n.as_str(), *d)).collect();
        prop_assert_eq!(resolved, orders);
    }

    /// Single-sort decoding keeps at most the first column
    #[test]
    fn single_sort_keeps_first(orders in active_orders()) {
        let resolved = sort(false, &orders).column_orders(false);
        prop_assert!(resolved.len() <= 1);
        if let Some((name, dir)) = orders.first() {
            prop_assert_eq!(resolved.get(*name), Some(dir));
        }
    }

    /// Arbitrary directive text never panics and only yields declared columns
    #[test]
    fn arbitrary_directives_are_tolerated(directive in ".{0,40}", multi in any::<bool>()) {
        let resolved = Sort::new()
            .with_columns(COLUMNS)
            .with_multi_sort(multi)
            .with_directive(directive)
            .column_orders(false);
        prop_assert!(resolved.keys().all(|name| COLUMNS.contains(&name.as_str())));
    }
}

// =============================================================================
// Sort Links
// =============================================================================

proptest! {
    /// Following a link makes the column primary with the toggled direction
    #[test]
    fn link_toggles_column(
        orders in active_orders(),
        column in proptest::sample::select(COLUMNS.to_vec()),
        multi in any::<bool>(),
    ) {
        let current = sort(multi, &orders);
        let before = current.column_order(column);

        let link = current.sort_link(column).unwrap();
        let next = current.clone().with_directive(link);

        let expected = before.map_or(Direction::Asc, Direction::reverse);
        let resolved = next.column_orders(false);
        prop_assert_eq!(resolved.get_index(0), Some((&column.to_string(), &expected)));
    }

    /// Following a link twice restores the column's direction
    #[test]
    fn link_twice_restores_direction(
        orders in active_orders(),
        column in proptest::sample::select(COLUMNS.to_vec()),
    ) {
        let current = sort(true, &orders);
        let once = current.clone().with_directive(current.sort_link(column).unwrap());
        let twice = once.clone().with_directive(once.sort_link(column).unwrap());

        let first = once.column_order(column).unwrap();
        prop_assert_eq!(twice.column_order(column), Some(first.reverse()));
    }

    /// In multi-sort mode the other active columns keep their relative order
    #[test]
    fn link_keeps_other_columns(
        orders in active_orders(),
        column in proptest::sample::select(COLUMNS.to_vec()),
    ) {
        let current = sort(true, &orders);
        let next = current.clone().with_directive(current.sort_link(column).unwrap());

        let others: Vec<_> = orders.iter().filter(|(n, _)| *n != column).copied().collect();
        let rest: Vec<_> = next
            .column_orders(false)
            .iter()
            .skip(1)
            .map(|(n, d)| (n.clone(), *d))
            .collect();
        let others: Vec<_> = others.into_iter().map(|(n, d)| (n.to_string(), d)).collect();
        prop_assert_eq!(rest, others);
    }

    /// Any declared name either gets a link that decodes back to it or is
    /// rejected up front
    #[test]
    fn declared_names_link_or_fail(name in "[ ,a-z-]{0,6}", multi in any::<bool>()) {
        let current = Sort::new()
            .with_columns([name.as_str(), "id"])
            .with_multi_sort(multi)
            .with_default_order([("created_at", Direction::Desc), ("id", Direction::Asc)]);

        match current.sort_link(&name) {
            Ok(link) => {
                prop_assert!(is_encodable_name(&name, ','));
                let next = current.clone().with_directive(link);
                let resolved = next.column_orders(false);
                prop_assert_eq!(resolved.get_index(0).map(|(n, _)| n.as_str()), Some(name.as_str()));
                prop_assert!(!resolved.contains_key("created_at"));
            }
            Err(err) => {
                prop_assert!(!is_encodable_name(&name, ','));
                prop_assert_eq!(err, Error::UnencodableColumn(name.clone()));
            }
        }
    }

    /// Unknown columns never produce a link
    #[test]
    fn unknown_column_link_fails(name in "[a-z]{1,8}") {
        prop_assume!(!COLUMNS.contains(&name.as_str()));
        prop_assert!(sort(true, &[]).sort_link(&name).is_err());
    }
}
