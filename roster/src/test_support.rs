//! Test-only helpers for building recipients, rows and scripted collaborators.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::core::text_order::TextOrder;
use crate::core::types::{RecipientRecord, RowModel, StudentsResponse, TableState};
use crate::io::source::{FetchError, JsonFileSource, QueryParams, RecipientSource};
use crate::io::status::StatusReporter;

/// Create a record with every field set.
pub fn record(name: &str, email: &str, section: &str, submitted: bool) -> RecipientRecord {
    RecipientRecord {
        email: email.to_string(),
        name: name.to_string(),
        section_name: Some(section.to_string()),
        team_name: format!("{section} team"),
        response_status: Some(submitted),
    }
}

/// Create a student record (has a section) with no response status.
pub fn student(email: &str, section: &str) -> RecipientRecord {
    RecipientRecord {
        email: email.to_string(),
        name: email.to_string(),
        section_name: Some(section.to_string()),
        ..RecipientRecord::default()
    }
}

/// Create an instructor record (no section).
pub fn instructor(email: &str) -> RecipientRecord {
    RecipientRecord {
        email: email.to_string(),
        name: email.to_string(),
        ..RecipientRecord::default()
    }
}

pub fn student_row(email: &str, section: &str) -> RowModel {
    RowModel::new(student(email, section))
}

pub fn instructor_row(email: &str) -> RowModel {
    RowModel::new(instructor(email))
}

/// Row identified only by display name.
pub fn named_row(name: &str) -> RowModel {
    RowModel::new(RecipientRecord {
        name: name.to_string(),
        ..RecipientRecord::default()
    })
}

/// Row identified only by email, with an explicit checkbox state.
pub fn row(email: &str, selected: bool) -> RowModel {
    let mut row = instructor_row(email);
    row.selected = selected;
    row
}

/// Table in its initial sort state holding `rows`.
pub fn table_of(rows: Vec<RowModel>) -> TableState {
    TableState {
        rows,
        ..TableState::default()
    }
}

pub fn emails(rows: &[RowModel]) -> Vec<&str> {
    rows.iter().map(|row| row.record.email.as_str()).collect()
}

pub fn names(rows: &[RowModel]) -> Vec<&str> {
    rows.iter().map(|row| row.record.name.as_str()).collect()
}

pub fn selected_emails(rows: &[RowModel]) -> Vec<&str> {
    rows.iter()
        .filter(|row| row.selected)
        .map(|row| row.record.email.as_str())
        .collect()
}

/// English collation, pinned so ordering assertions are deterministic.
pub fn en_order() -> TextOrder {
    TextOrder::for_locale("en").expect("en collation data")
}

/// Status reporter that records every message.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("reporter lock").clone()
    }
}

impl StatusReporter for RecordingReporter {
    fn show_error_message(&self, text: &str) {
        self.messages
            .lock()
            .expect("reporter lock")
            .push(text.to_string());
    }
}

/// Source that replays queued results and records each call.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<RecipientRecord>, FetchError>>>,
    calls: Mutex<Vec<(String, QueryParams)>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Vec<RecipientRecord>, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(path, params)` of every call so far.
    pub fn calls(&self) -> Vec<(String, QueryParams)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl RecipientSource for ScriptedSource {
    async fn get(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<StudentsResponse, FetchError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((path.to_string(), params.clone()));
        let next = self
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::new("no scripted response left")));
        next.map(|students_response| StudentsResponse { students_response })
    }
}

/// Write `records` where a [`JsonFileSource`] rooted at `root` serves `path`.
pub fn write_response(root: &Path, path: &str, records: &[RecipientRecord]) -> Result<PathBuf> {
    let file = JsonFileSource::new(root).file_for(path)?;
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let response = StudentsResponse {
        students_response: records.to_vec(),
    };
    let mut buf = serde_json::to_string_pretty(&response)?;
    buf.push('\n');
    fs::write(&file, buf).with_context(|| format!("write {}", file.display()))?;
    Ok(file)
}

/// Temporary data directory serving `records` at `path`.
pub fn fixture_dir(path: &str, records: &[RecipientRecord]) -> Result<tempfile::TempDir> {
    let dir = tempfile::tempdir().context("create fixture dir")?;
    write_response(dir.path(), path, records)?;
    Ok(dir)
}
