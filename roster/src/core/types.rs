//! Shared deterministic types for the recipient tables.
//!
//! These types define stable contracts between core components and with the
//! remote data source. They do not depend on external state or I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One person as reported by the data source.
///
/// Field names follow the source's camelCase wire shape. Absent strings
/// deserialize as empty; `response_status` stays `None` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipientRecord {
    pub email: String,
    pub name: String,
    pub section_name: Option<String>,
    pub team_name: String,
    /// Whether the person has already submitted a response.
    pub response_status: Option<bool>,
}

impl RecipientRecord {
    /// Instructors carry no section: absent or empty.
    pub fn is_instructor(&self) -> bool {
        self.section_name.as_deref().is_none_or(str::is_empty)
    }

    /// Text compared when sorting by `key`. Missing values read as `""`.
    pub fn sort_field(&self, key: SortKey) -> &str {
        match key {
            SortKey::None => "",
            SortKey::Section => self.section_name.as_deref().unwrap_or(""),
            SortKey::Team => &self.team_name,
            SortKey::Name => &self.name,
            SortKey::Email => &self.email,
            SortKey::ResponseStatus => match self.response_status {
                Some(true) => "true",
                Some(false) => "false",
                None => "",
            },
        }
    }
}

/// Response envelope returned by the data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentsResponse {
    pub students_response: Vec<RecipientRecord>,
}

/// A displayable, selectable table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowModel {
    #[serde(flatten)]
    pub record: RecipientRecord,
    pub selected: bool,
}

impl RowModel {
    pub fn new(record: RecipientRecord) -> Self {
        Self {
            record,
            selected: false,
        }
    }
}

/// The two role-disjoint tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Students,
    Instructors,
}

impl Partition {
    pub fn as_str(self) -> &'static str {
        match self {
            Partition::Students => "students",
            Partition::Instructors => "instructors",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Partition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "students" => Ok(Partition::Students),
            "instructors" => Ok(Partition::Instructors),
            other => Err(format!(
                "unknown partition '{other}' (expected students or instructors)"
            )),
        }
    }
}

/// Column a table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    None,
    Section,
    Team,
    Name,
    Email,
    ResponseStatus,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Section => "section",
            SortKey::Team => "team",
            SortKey::Name => "name",
            SortKey::Email => "email",
            SortKey::ResponseStatus => "response_status",
        }
    }

    /// Parse a key name from an untrusted boundary.
    ///
    /// Unrecognised names map to [`SortKey::None`], which sorts as a no-op.
    pub fn from_name(name: &str) -> SortKey {
        name.parse().unwrap_or(SortKey::None)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortKey::None),
            "section" | "section_name" => Ok(SortKey::Section),
            "team" | "team_name" => Ok(SortKey::Team),
            "name" | "student_name" => Ok(SortKey::Name),
            "email" | "student_email" => Ok(SortKey::Email),
            "response_status" | "submit_status" => Ok(SortKey::ResponseStatus),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// `Descending` flips to `Ascending`; anything else flips to `Descending`.
    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }
}

/// Rows of one partition plus the state of its toggling sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub(crate) rows: Vec<RowModel>,
    pub(crate) sort_key: SortKey,
    pub(crate) sort_direction: SortDirection,
}

impl TableState {
    pub fn rows(&self) -> &[RowModel] {
        &self.rows
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outbound payload for the remind endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemindRequest {
    pub users_to_remind: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_section_is_instructor() {
        let mut record = RecipientRecord::default();
        assert!(record.is_instructor());
        record.section_name = Some(String::new());
        assert!(record.is_instructor());
        record.section_name = Some("S1".to_string());
        assert!(!record.is_instructor());
    }

    #[test]
    fn record_parses_partial_wire_shape() {
        let record: RecipientRecord =
            serde_json::from_str(r#"{"email":"a@x.com","responseStatus":true}"#).expect("parse");
        assert_eq!(record.email, "a@x.com");
        assert_eq!(record.name, "");
        assert_eq!(record.section_name, None);
        assert_eq!(record.sort_field(SortKey::ResponseStatus), "true");
        assert_eq!(record.sort_field(SortKey::Section), "");
    }

    #[test]
    fn unknown_key_name_falls_back_to_none() {
        assert_eq!(SortKey::from_name("team"), SortKey::Team);
        assert_eq!(SortKey::from_name("SUBMIT"), SortKey::None);
        assert!("bogus".parse::<SortKey>().is_err());
    }

    #[test]
    fn direction_toggles_both_ways() {
        assert_eq!(SortDirection::default(), SortDirection::Descending);
        assert_eq!(
            SortDirection::Descending.toggled(),
            SortDirection::Ascending
        );
        assert_eq!(
            SortDirection::Ascending.toggled(),
            SortDirection::Descending
        );
    }

    #[test]
    fn remind_request_uses_wire_field_name() {
        let request = RemindRequest {
            users_to_remind: vec!["a@x.com".to_string()],
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["usersToRemind"][0], "a@x.com");
    }
}
