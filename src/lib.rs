//! # Chronolog
//!
//! A personal command-line time tracker. Work is recorded as point-in-time
//! entries: each entry marks the moment a piece of work ended, and its
//! duration is the gap to the entry before it. Reports rebuild those
//! durations, round them, and group them by project, task, day and entry.
//! Ticketed time can be pushed to Jira as worklogs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chronolog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
