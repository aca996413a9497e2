//! Checkbox bookkeeping for a partition's rows.

use crate::core::types::RowModel;

/// Set every row's `selected` flag.
pub fn set_all(rows: &mut [RowModel], selected: bool) {
    for row in rows {
        row.selected = selected;
    }
}

/// Set one row's flag. Returns `false` when `index` is out of range.
pub fn set_one(rows: &mut [RowModel], index: usize, selected: bool) -> bool {
    match rows.get_mut(index) {
        Some(row) => {
            row.selected = selected;
            true
        }
        None => false,
    }
}

/// Set the flag on every row whose email equals `email`; returns how many matched.
pub fn set_matching_email(rows: &mut [RowModel], email: &str, selected: bool) -> usize {
    let mut touched = 0;
    for row in rows.iter_mut().filter(|row| row.record.email == email) {
        row.selected = selected;
        touched += 1;
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{row, selected_emails};

    #[test]
    fn set_all_then_clear_leaves_nothing_selected() {
        let mut rows = vec![row("a", false), row("b", true), row("c", false)];

        set_all(&mut rows, true);
        assert!(rows.iter().all(|r| r.selected));

        set_all(&mut rows, false);
        assert!(rows.iter().all(|r| !r.selected));
    }

    #[test]
    fn set_one_rejects_out_of_range_index() {
        let mut rows = vec![row("a", false)];
        assert!(set_one(&mut rows, 0, true));
        assert!(!set_one(&mut rows, 1, true));
        assert_eq!(selected_emails(&rows), vec!["a"]);
    }

    #[test]
    fn email_match_touches_duplicates() {
        let mut rows = vec![row("a", false), row("b", false), row("a", false)];
        assert_eq!(set_matching_email(&mut rows, "a", true), 2);
        assert_eq!(set_matching_email(&mut rows, "missing", true), 0);
        assert_eq!(selected_emails(&rows), vec!["a", "a"]);
    }

    #[test]
    fn empty_rows_are_fine() {
        let mut rows: Vec<RowModel> = Vec::new();
        set_all(&mut rows, true);
        assert!(!set_one(&mut rows, 0, true));
    }
}
