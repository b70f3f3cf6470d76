//! Typed failures of the tracking pipeline.
//!
//! Everything else travels as `anyhow::Error`; these variants exist where a
//! caller or a test needs to tell failures apart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Entry {id} has an unreadable timestamp: '{value}'")]
    MalformedTimestamp { id: i64, value: String },

    #[error("Expected 'project+task[+task...]', got '{0}'")]
    MalformedProjectTask(String),

    #[error("Jira rejected the worklog for entry {entry_id} (HTTP {status}): {body}")]
    PushRejected { entry_id: i64, status: u16, body: String },

    #[error("Could not send the worklog for entry {entry_id}: {message}")]
    PushTransport { entry_id: i64, message: String },

    #[error("Jira is not configured, run 'chronolog init' and select Jira")]
    MissingPushConfig,

    #[error("Unknown weekday '{0}'")]
    InvalidWeekday(String),

    #[error("Cannot understand the time '{0}'")]
    InvalidTime(String),

    #[error("Favorite #{0} does not exist")]
    FavoriteNotFound(usize),

    #[error("No entries found")]
    NoEntries,
}
