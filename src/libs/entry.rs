//! Point-event model shared by the store, the interval engine and the reports.
//!
//! Every stored entry marks the instant an activity *stopped*. The duration of
//! the activity is reconstructed later from the gap to the previous entry, see
//! [`crate::libs::interval`].

use crate::libs::error::TrackerError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Project label of the entry that opens a working day.
pub const DAY_START: &str = "***hello";
/// Project label of a break entry.
pub const BREAK: &str = "***break";

pub const PROP_TASK: &str = "task";
pub const PROP_URL: &str = "url";
pub const PROP_TICKET: &str = "ticket";
pub const PROP_PUSHED: &str = "pushed";

/// Separator between project and tasks in `project+task+task`.
pub const TASK_DELIMITER: char = '+';
/// Separator used when several tasks are rendered in one cell.
pub const TASK_JOIN: &str = ", ";

/// A named string attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Read access to the well-known properties of anything carrying a property list.
pub trait HasProperties {
    fn properties(&self) -> &[Property];

    fn property_values(&self, name: &str) -> Vec<&str> {
        self.properties()
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.value.as_str())
            .collect()
    }

    fn first_property(&self, name: &str) -> Option<&str> {
        self.properties()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name) && !p.value.trim().is_empty())
            .map(|p| p.value.as_str())
    }

    fn tasks(&self) -> Vec<&str> {
        self.property_values(PROP_TASK)
    }

    /// All tasks joined into a single display string.
    fn task_string(&self) -> String {
        self.tasks().join(TASK_JOIN)
    }

    fn ticket(&self) -> Option<&str> {
        self.first_property(PROP_TICKET)
    }

    fn url(&self) -> Option<&str> {
        self.first_property(PROP_URL)
    }

    fn pushed(&self) -> Option<&str> {
        self.first_property(PROP_PUSHED)
    }
}

/// Appends a property unless an equal one (case-insensitive on name and value) exists.
pub fn add_property(properties: &mut Vec<Property>, name: &str, value: &str) {
    let exists = properties
        .iter()
        .any(|p| p.name.eq_ignore_ascii_case(name) && p.value.eq_ignore_ascii_case(value));
    if !exists {
        properties.push(Property::new(name, value));
    }
}

/// A stored entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointEvent {
    pub id: i64,
    pub project: String,
    pub note: String,
    pub timestamp: DateTime<Utc>,
    pub properties: Vec<Property>,
}

impl PointEvent {
    pub fn is_day_start(&self) -> bool {
        self.project == DAY_START
    }

    pub fn is_break(&self) -> bool {
        self.project == BREAK
    }
}

impl HasProperties for PointEvent {
    fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// An entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub project: String,
    pub note: String,
    pub timestamp: DateTime<Utc>,
    pub properties: Vec<Property>,
}

impl NewEntry {
    pub fn new(project: &str, note: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            project: project.to_string(),
            note: note.to_string(),
            timestamp,
            properties: Vec::new(),
        }
    }

    pub fn day_start(timestamp: DateTime<Utc>) -> Self {
        Self::new(DAY_START, "", timestamp)
    }

    pub fn break_time(note: &str, timestamp: DateTime<Utc>) -> Self {
        Self::new(BREAK, note, timestamp)
    }

    /// Builds an activity entry from `project+task[+task...]`.
    ///
    /// At least one task is required, blank pieces are rejected.
    pub fn from_project_task(project_task: &str, note: &str, timestamp: DateTime<Utc>) -> Result<Self, TrackerError> {
        let pieces: Vec<&str> = project_task.split(TASK_DELIMITER).map(str::trim).collect();
        if pieces.len() < 2 || pieces.iter().any(|p| p.is_empty()) {
            return Err(TrackerError::MalformedProjectTask(project_task.to_string()));
        }
        let mut entry = Self::new(pieces[0], note, timestamp);
        for task in &pieces[1..] {
            entry.add_property(PROP_TASK, task);
        }
        Ok(entry)
    }

    pub fn add_property(&mut self, name: &str, value: &str) {
        if !value.trim().is_empty() {
            add_property(&mut self.properties, name, value.trim());
        }
    }

    pub fn with_property(mut self, name: &str, value: &str) -> Self {
        self.add_property(name, value);
        self
    }
}

impl HasProperties for NewEntry {
    fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// Storage representation of a timestamp: UTC, whole seconds, `Z` suffix.
pub fn to_storage(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn from_storage(id: i64, value: &str) -> Result<DateTime<Utc>, TrackerError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| TrackerError::MalformedTimestamp {
            id,
            value: value.to_string(),
        })
}
