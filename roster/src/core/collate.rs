//! Reduce checked rows into the remind payload.

use crate::core::types::{RemindRequest, RowModel};

/// Emails of the selected rows of one partition, in table order.
pub fn collate_one(rows: &[RowModel]) -> RemindRequest {
    RemindRequest {
        users_to_remind: selected_emails(rows).collect(),
    }
}

/// Selected students followed by selected instructors.
///
/// No deduplication: a person listed in both tables appears twice.
pub fn collate_both(students: &[RowModel], instructors: &[RowModel]) -> RemindRequest {
    RemindRequest {
        users_to_remind: selected_emails(students)
            .chain(selected_emails(instructors))
            .collect(),
    }
}

fn selected_emails(rows: &[RowModel]) -> impl Iterator<Item = String> + '_ {
    rows.iter()
        .filter(|row| row.selected)
        .map(|row| row.record.email.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::row;

    #[test]
    fn only_selected_rows_are_collated() {
        let rows = vec![row("a", true), row("b", false), row("c", true)];
        assert_eq!(collate_one(&rows).users_to_remind, vec!["a", "c"]);
    }

    #[test]
    fn students_come_before_instructors() {
        let students = vec![row("s1", true)];
        let instructors = vec![row("i1", true)];
        assert_eq!(
            collate_both(&students, &instructors).users_to_remind,
            vec!["s1", "i1"]
        );
    }

    #[test]
    fn duplicates_and_odd_emails_pass_through_verbatim() {
        let students = vec![row("same", true), row("not-an-email", true)];
        let instructors = vec![row("same", true), row("", true)];
        assert_eq!(
            collate_both(&students, &instructors).users_to_remind,
            vec!["same", "not-an-email", "same", ""]
        );
    }

    #[test]
    fn collation_leaves_rows_untouched() {
        let rows = vec![row("a", true), row("b", false)];
        let before = rows.clone();
        let _ = collate_one(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn empty_partitions_collate_to_empty_payload() {
        assert_eq!(collate_one(&[]), RemindRequest::default());
        assert_eq!(collate_both(&[], &[]), RemindRequest::default());
    }
}
