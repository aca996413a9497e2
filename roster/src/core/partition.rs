//! Role classification of loaded rows.

use crate::core::types::RowModel;

/// Split rows into `(students, instructors)` in a single pass.
///
/// Rows without a section go to instructors. Relative order within each
/// output matches the input, so re-running over a clean students list is a
/// no-op.
pub fn partition(rows: Vec<RowModel>) -> (Vec<RowModel>, Vec<RowModel>) {
    rows.into_iter().partition(|row| !row.record.is_instructor())
}
