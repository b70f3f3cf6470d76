//! Core building blocks of chronolog.
//!
//! The time model lives in [`entry`], [`interval`], [`rounding`] and
//! [`report`]; [`sections`], [`formatter`], [`view`] and [`export`] turn it
//! into output. [`push`] prepares Jira worklogs. The rest is infrastructure:
//! configuration, storage paths, secrets, date parsing and messages.

pub mod config;
pub mod data_storage;
pub mod datetime;
pub mod entry;
pub mod error;
pub mod export;
pub mod formatter;
pub mod interval;
pub mod messages;
pub mod push;
pub mod report;
pub mod rounding;
pub mod secret;
pub mod sections;
pub mod view;
