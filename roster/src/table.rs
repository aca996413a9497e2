//! Row table engine: the two partition tables and their load lifecycle.
//!
//! The table owns every row. Hosts read rows through [`TableState`] views and
//! change them only through the sort and selection operations here.
//!
//! Loads are split into [`RecipientTable::begin_load`] and
//! [`RecipientTable::finish_load`] so a host can release the table while the
//! fetch is in flight. Each begin bumps a generation counter; a completion
//! whose ticket is no longer the latest is discarded.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::collate::{collate_both, collate_one};
use crate::core::partition::partition;
use crate::core::selection::{set_all, set_matching_email, set_one};
use crate::core::sort::toggle_sort;
use crate::core::text_order::{TextOrder, TextOrderError};
use crate::core::types::{Partition, RecipientRecord, RemindRequest, RowModel, SortKey, TableState};
use crate::io::config::{LoadMode, RosterConfig};
use crate::io::source::FetchError;
use crate::io::status::StatusReporter;

/// Handle for one dispatched load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// What a completed load did to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Rows were merged; partition sizes after the merge.
    Applied { students: usize, instructors: usize },
    /// The fetch failed and the message was reported.
    Failed { message: String },
    /// A newer load was dispatched first; the result was dropped.
    Superseded,
}

#[derive(Debug)]
pub struct RecipientTable {
    students: TableState,
    instructors: TableState,
    order: TextOrder,
    load_mode: LoadMode,
    default_sort: SortKey,
    generation: u64,
    loading: bool,
    last_load_succeeded: bool,
}

impl RecipientTable {
    pub fn new(order: TextOrder, load_mode: LoadMode, default_sort: SortKey) -> Self {
        Self {
            students: TableState::default(),
            instructors: TableState::default(),
            order,
            load_mode,
            default_sort,
            generation: 0,
            loading: false,
            last_load_succeeded: true,
        }
    }

    pub fn from_config(cfg: &RosterConfig) -> Result<Self, TextOrderError> {
        let order = TextOrder::for_locale(&cfg.locale)?;
        Ok(Self::new(order, cfg.load_mode, cfg.default_sort))
    }

    pub fn students(&self) -> &TableState {
        &self.students
    }

    pub fn instructors(&self) -> &TableState {
        &self.instructors
    }

    pub fn table(&self, partition: Partition) -> &TableState {
        match partition {
            Partition::Students => &self.students,
            Partition::Instructors => &self.instructors,
        }
    }

    fn table_mut(&mut self, partition: Partition) -> &mut TableState {
        match partition {
            Partition::Students => &mut self.students,
            Partition::Instructors => &mut self.instructors,
        }
    }

    pub fn locale(&self) -> &str {
        self.order.locale()
    }

    /// True between a dispatch and the completion of the latest load.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_load_succeeded(&self) -> bool {
        self.last_load_succeeded
    }

    /// Dispatch a load. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        debug!(generation = self.generation, "load dispatched");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Complete the load identified by `ticket`.
    ///
    /// Failures are reported once through `reporter` and leave rows untouched.
    pub fn finish_load<R: StatusReporter>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<RecipientRecord>, FetchError>,
        reporter: &R,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                latest = self.generation,
                "discarding superseded load"
            );
            return LoadOutcome::Superseded;
        }
        self.loading = false;

        match result {
            Ok(records) => {
                self.last_load_succeeded = true;
                self.apply_records(records);
                info!(
                    students = self.students.len(),
                    instructors = self.instructors.len(),
                    "recipients loaded"
                );
                LoadOutcome::Applied {
                    students: self.students.len(),
                    instructors: self.instructors.len(),
                }
            }
            Err(err) => {
                self.last_load_succeeded = false;
                reporter.show_error_message(&err.message);
                LoadOutcome::Failed {
                    message: err.message,
                }
            }
        }
    }

    fn apply_records(&mut self, records: Vec<RecipientRecord>) {
        if self.load_mode == LoadMode::Replace {
            self.students.rows.clear();
            self.instructors.rows.clear();
        }
        self.students
            .rows
            .extend(records.into_iter().map(RowModel::new));

        let (students, instructors) = partition(std::mem::take(&mut self.students.rows));
        self.students.rows = students;
        self.instructors.rows.extend(instructors);

        let key = self.default_sort;
        self.sort(Partition::Students, key);
        self.sort(Partition::Instructors, key);
    }

    /// Toggle-sort one partition by `key`.
    pub fn sort(&mut self, partition: Partition, key: SortKey) {
        let table = match partition {
            Partition::Students => &mut self.students,
            Partition::Instructors => &mut self.instructors,
        };
        toggle_sort(table, key, &self.order);
        debug!(
            %partition,
            key = %table.sort_key(),
            direction = ?table.sort_direction(),
            "table sorted"
        );
    }

    pub fn set_all(&mut self, partition: Partition, selected: bool) {
        set_all(&mut self.table_mut(partition).rows, selected);
    }

    /// Set one row's checkbox. Returns `false` when `index` is out of range.
    pub fn set_selected(&mut self, partition: Partition, index: usize, selected: bool) -> bool {
        set_one(&mut self.table_mut(partition).rows, index, selected)
    }

    /// Set every row in either partition whose email equals `email`.
    pub fn set_selected_by_email(&mut self, email: &str, selected: bool) -> usize {
        set_matching_email(&mut self.students.rows, email, selected)
            + set_matching_email(&mut self.instructors.rows, email, selected)
    }

    pub fn collate_one(&self, partition: Partition) -> RemindRequest {
        collate_one(self.table(partition).rows())
    }

    pub fn collate_both(&self) -> RemindRequest {
        collate_both(self.students.rows(), self.instructors.rows())
    }
}
