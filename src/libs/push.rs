//! Selection of intervals for Jira and worklog payload construction.

use crate::api::WorklogSink;
use crate::db::entries::Entries;
use crate::libs::entry::HasProperties;
use crate::libs::error::TrackerError;
use crate::libs::interval::Interval;
use crate::libs::messages::Message;
use crate::libs::rounding::round;
use crate::{msg_debug, msg_success};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Jira's accepted `started` layout, e.g. `2025-01-15T09:00:00.000+0000`.
pub const JIRA_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// HTTP status Jira answers with when a worklog is created.
pub const STATUS_CREATED: u16 = 201;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentText {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentParagraph {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Vec<CommentText>,
}

/// Atlassian document body holding a single paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: u32,
    pub content: Vec<CommentParagraph>,
}

impl Comment {
    pub fn paragraph(text: &str) -> Self {
        Self {
            kind: "doc".to_string(),
            version: 1,
            content: vec![CommentParagraph {
                kind: "paragraph".to_string(),
                content: vec![CommentText {
                    kind: "text".to_string(),
                    text: text.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogPayload {
    pub started: String,
    pub time_spent_seconds: i64,
    pub comment: Comment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushRequest {
    pub entry_id: i64,
    pub ticket: String,
    pub payload: WorklogPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PushResponse {
    pub status: u16,
    pub body: String,
}

pub fn jira_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format(JIRA_TIME_LAYOUT).to_string()
}

/// Has a ticket and has not been pushed yet.
pub fn is_eligible(interval: &Interval) -> bool {
    interval.ticket().is_some() && interval.pushed().is_none()
}

pub fn build_push_payloads(intervals: &[Interval], round_to_minutes: i64) -> Vec<PushRequest> {
    intervals
        .iter()
        .filter(|i| is_eligible(i))
        .filter_map(|interval| {
            let ticket = interval.ticket()?.to_string();
            Some(PushRequest {
                entry_id: interval.id,
                ticket,
                payload: WorklogPayload {
                    started: jira_timestamp(&interval.start()),
                    time_spent_seconds: round(interval.duration, round_to_minutes),
                    comment: Comment::paragraph(&interval.note),
                },
            })
        })
        .collect()
}

/// Sends every request in order and marks the entry pushed on `201 Created`.
///
/// The first failure stops the batch. Entries marked before it stay marked.
pub async fn push_all<S: WorklogSink>(sink: &S, entries: &Entries, requests: &[PushRequest]) -> Result<usize> {
    let mut pushed = 0;

    for request in requests {
        msg_debug!(format!("Pushing entry {} to {}", request.entry_id, request.ticket));
        let response = sink.send(request).await.map_err(|e| TrackerError::PushTransport {
            entry_id: request.entry_id,
            message: e.to_string(),
        })?;

        if response.status != STATUS_CREATED {
            return Err(TrackerError::PushRejected {
                entry_id: request.entry_id,
                status: response.status,
                body: response.body,
            }
            .into());
        }

        entries.mark_pushed(request.entry_id)?;
        msg_success!(Message::EntryPushed(request.entry_id, request.ticket.clone()));
        pushed += 1;
    }

    Ok(pushed)
}
