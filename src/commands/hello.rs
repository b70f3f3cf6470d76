use crate::{
    db::entries::Entries,
    libs::{datetime::resolve_at, entry::{NewEntry, PointEvent}, messages::Message},
    msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{DateTime, Local, Timelike, Utc};
use clap::Args;

#[derive(Debug, Args)]
pub struct HelloArgs {
    /// Start time, e.g. 08:30, 8:30am, "2025-01-15 08:30" or "20 minutes ago"
    #[arg(long)]
    at: Option<String>,
}

pub fn cmd(args: HelloArgs) -> Result<()> {
    let at = resolve_at(args.at.as_deref())?;
    if start_day(&Entries::new()?, at)? {
        msg_success!(Message::Greeting(greeting(at.with_timezone(&Local).hour()).to_string()));
    }
    Ok(())
}

/// Stores a day-start marker at `at` unless its local day already has one.
///
/// A repeated start only warns; returns whether a marker was stored.
pub fn start_day(entries: &Entries, at: DateTime<Utc>) -> Result<bool> {
    let day = at.with_timezone(&Local).date_naive();
    if already_started(&entries.fetch_day(day, &Local)?) {
        msg_warning!(Message::AlreadyStarted(day.to_string()));
        return Ok(false);
    }
    entries.insert(&NewEntry::day_start(at))?;
    Ok(true)
}

/// Whether the day's entries already contain a day-start marker.
pub fn already_started(day_entries: &[PointEvent]) -> bool {
    day_entries.iter().any(PointEvent::is_day_start)
}

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}
