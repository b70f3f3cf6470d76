//! Outbound integrations.
//!
//! The report command pushes rounded time to an external worklog service
//! through [`WorklogSink`]. [`jira::Jira`] is the production implementation;
//! tests substitute their own sink.

use crate::libs::push::{PushRequest, PushResponse};
use anyhow::Result;

pub mod jira;

pub use jira::JiraConfig;

/// Destination for worklog pushes.
#[allow(async_fn_in_trait)]
pub trait WorklogSink {
    /// Sends one worklog and returns the raw HTTP outcome.
    ///
    /// Only transport failures are errors here; any status code the server
    /// answers with is returned for the caller to judge.
    async fn send(&self, request: &PushRequest) -> Result<PushResponse>;
}
