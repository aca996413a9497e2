//! Toggling sort over one partition table.
//!
//! Every call flips the direction before sorting, whatever key was used
//! last. Clicking a different column therefore sorts it in the opposite
//! direction to the previous click rather than resetting to ascending.

use std::cmp::Ordering;

use crate::core::text_order::TextOrder;
use crate::core::types::{RowModel, SortDirection, SortKey, TableState};

/// Flip the table's direction, adopt `key`, and reorder its rows.
pub fn toggle_sort(table: &mut TableState, key: SortKey, order: &TextOrder) {
    table.sort_key = key;
    table.sort_direction = table.sort_direction.toggled();
    sort_rows(&mut table.rows, key, table.sort_direction, order);
}

/// Stable sort of `rows` by the text field selected by `key`.
///
/// `SortKey::None` leaves the order untouched.
pub fn sort_rows(
    rows: &mut [RowModel],
    key: SortKey,
    direction: SortDirection,
    order: &TextOrder,
) {
    if key == SortKey::None {
        return;
    }
    rows.sort_by(|a, b| compare_rows(a, b, key, direction, order));
}

fn compare_rows(
    a: &RowModel,
    b: &RowModel,
    key: SortKey,
    direction: SortDirection,
    order: &TextOrder,
) -> Ordering {
    let lhs = a.record.sort_field(key);
    let rhs = b.record.sort_field(key);
    match direction {
        SortDirection::Ascending => order.compare(lhs, rhs),
        SortDirection::Descending => order.compare(rhs, lhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{emails, en_order, named_row, names, student_row, table_of};

    #[test]
    fn first_call_flips_initial_descending_to_ascending() {
        let order = en_order();
        let mut table = table_of(vec![named_row("Cara"), named_row("Abe"), named_row("Bo")]);

        toggle_sort(&mut table, SortKey::Name, &order);

        assert_eq!(table.sort_key(), SortKey::Name);
        assert_eq!(table.sort_direction(), SortDirection::Ascending);
        assert_eq!(names(table.rows()), vec!["Abe", "Bo", "Cara"]);
    }

    #[test]
    fn same_key_twice_restores_direction_and_order() {
        let order = en_order();
        let original = vec![named_row("Bo"), named_row("Abe"), named_row("Cara")];
        let mut table = table_of(original);
        toggle_sort(&mut table, SortKey::Name, &order);
        let first_direction = table.sort_direction();
        let first_pass = table.rows().to_vec();

        toggle_sort(&mut table, SortKey::Name, &order);
        toggle_sort(&mut table, SortKey::Name, &order);

        assert_eq!(table.sort_direction(), first_direction);
        assert_eq!(table.rows(), first_pass.as_slice());
    }

    #[test]
    fn different_key_keeps_toggling_from_current_direction() {
        let order = en_order();
        let mut table = table_of(vec![
            student_row("b@x.com", "S1"),
            student_row("a@x.com", "S2"),
        ]);

        toggle_sort(&mut table, SortKey::Section, &order);
        assert_eq!(table.sort_direction(), SortDirection::Ascending);

        toggle_sort(&mut table, SortKey::Email, &order);
        assert_eq!(table.sort_key(), SortKey::Email);
        assert_eq!(table.sort_direction(), SortDirection::Descending);
        assert_eq!(emails(table.rows()), vec!["b@x.com", "a@x.com"]);
    }

    #[test]
    fn ties_keep_prior_relative_order_in_both_directions() {
        let order = en_order();
        let rows = vec![
            student_row("first@x.com", "S1"),
            student_row("other@x.com", "S0"),
            student_row("second@x.com", "S1"),
            student_row("third@x.com", "S1"),
        ];
        let mut table = table_of(rows);

        toggle_sort(&mut table, SortKey::Section, &order);
        assert_eq!(
            emails(table.rows()),
            vec!["other@x.com", "first@x.com", "second@x.com", "third@x.com"]
        );

        toggle_sort(&mut table, SortKey::Section, &order);
        assert_eq!(
            emails(table.rows()),
            vec!["first@x.com", "second@x.com", "third@x.com", "other@x.com"]
        );
    }

    #[test]
    fn none_key_is_a_stable_no_op() {
        let order = en_order();
        let rows = vec![named_row("Zed"), named_row("Amy")];
        let mut table = table_of(rows.clone());

        toggle_sort(&mut table, SortKey::None, &order);

        assert_eq!(table.sort_direction(), SortDirection::Ascending);
        assert_eq!(table.rows(), rows.as_slice());
    }

    #[test]
    fn missing_status_sorts_as_empty_string() {
        let order = en_order();
        let mut submitted = named_row("Done");
        submitted.record.response_status = Some(true);
        let mut pending = named_row("Pending");
        pending.record.response_status = Some(false);
        let unknown = named_row("Unknown");
        let mut table = table_of(vec![submitted, unknown, pending]);

        toggle_sort(&mut table, SortKey::ResponseStatus, &order);

        assert_eq!(names(table.rows()), vec!["Unknown", "Pending", "Done"]);
    }

    #[test]
    fn names_follow_locale_collation_not_code_points() {
        let order = en_order();
        let mut table = table_of(vec![named_row("Zoe"), named_row("Änne"), named_row("Anna")]);

        toggle_sort(&mut table, SortKey::Name, &order);

        assert_eq!(names(table.rows()), vec!["Anna", "Änne", "Zoe"]);
    }

    #[test]
    fn locale_changes_umlaut_placement() {
        let order = TextOrder::for_locale("sv").expect("sv");
        let mut table = table_of(vec![named_row("Änne"), named_row("Zoe")]);

        toggle_sort(&mut table, SortKey::Name, &order);

        assert_eq!(names(table.rows()), vec!["Zoe", "Änne"]);
    }

    #[test]
    fn empty_table_sorts_without_error() {
        let order = en_order();
        let mut table = TableState::default();
        toggle_sort(&mut table, SortKey::Email, &order);
        assert!(table.is_empty());
        assert_eq!(table.sort_key(), SortKey::Email);
    }
}
