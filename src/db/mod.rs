//! SQLite persistence.
//!
//! The schema has two tables: `entry` holds one row per point event and
//! `property` holds its name/value pairs (tasks, url, ticket, pushed).
//! Properties are removed with their entry through `ON DELETE CASCADE`.

/// Connection setup and database location.
pub mod db;

/// Entry and property storage: inserts, range queries, updates and purging.
pub mod entries;

/// Versioned schema changes.
pub mod migrations;
