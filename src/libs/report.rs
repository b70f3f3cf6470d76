//! Report aggregations over reconstructed intervals.
//!
//! Each interval is rounded on its own before it is added to a group, so the
//! totals of every view agree with each other for the same granularity. All
//! groupings use `BTreeMap` and therefore come out sorted by key.

use crate::libs::entry::{HasProperties, TASK_JOIN};
use crate::libs::interval::Interval;
use crate::libs::rounding::round;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRow {
    pub project: String,
    pub tasks: String,
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub task: String,
    pub projects: String,
    pub ticket: Option<String>,
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskReport {
    pub rows: Vec<TaskRow>,
    /// Whether any row carries a ticket, decides if the column is rendered.
    pub has_tickets: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRow {
    pub project: String,
    pub tasks: String,
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub rows: Vec<DayRow>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRow {
    pub id: i64,
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: i64,
    pub project: String,
    pub tasks: String,
    pub note: String,
    /// Push status for ticketed entries: the push time or `"No"`.
    pub pushed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReport {
    pub rows: Vec<EntryRow>,
    pub has_tickets: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub work: i64,
    pub break_time: i64,
}

impl Totals {
    pub fn all(&self) -> i64 {
        self.work + self.break_time
    }
}

/// Collects distinct values case-insensitively, keeping first-seen order.
#[derive(Debug, Default)]
struct Distinct(Vec<String>);

impl Distinct {
    fn push(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        if !self.0.iter().any(|v| v.eq_ignore_ascii_case(value)) {
            self.0.push(value.to_string());
        }
    }

    fn joined(&self) -> String {
        self.0.join(TASK_JOIN)
    }
}

#[derive(Debug, Default)]
struct Group {
    labels: Distinct,
    ticket: Option<String>,
    duration: i64,
}

pub fn aggregate_by_project(intervals: &[Interval], round_to_minutes: i64) -> Vec<ProjectRow> {
    let mut groups: BTreeMap<String, Group> = BTreeMap::new();

    for interval in intervals.iter().filter(|i| !i.is_day_start()) {
        let group = groups.entry(interval.project.clone()).or_default();
        for task in interval.tasks() {
            group.labels.push(task);
        }
        group.duration += round(interval.duration, round_to_minutes);
    }

    groups
        .into_iter()
        .map(|(project, group)| ProjectRow {
            project,
            tasks: group.labels.joined(),
            duration: group.duration,
        })
        .collect()
}

pub fn aggregate_by_task(intervals: &[Interval], round_to_minutes: i64) -> TaskReport {
    let mut groups: BTreeMap<(String, String), Group> = BTreeMap::new();

    for interval in intervals.iter().filter(|i| !i.is_day_start()) {
        let key = (interval.task_string(), interval.project.clone());
        let group = groups.entry(key).or_default();
        group.labels.push(&interval.project);
        if group.ticket.is_none() {
            group.ticket = interval.ticket().map(str::to_string);
        }
        group.duration += round(interval.duration, round_to_minutes);
    }

    let has_tickets = groups.values().any(|g| g.ticket.is_some());
    let rows = groups
        .into_iter()
        .map(|((task, _), group)| TaskRow {
            task,
            projects: group.labels.joined(),
            ticket: group.ticket,
            duration: group.duration,
        })
        .collect();

    TaskReport { rows, has_tickets }
}

pub fn aggregate_by_day(intervals: &[Interval], round_to_minutes: i64) -> Vec<DayGroup> {
    let mut days: BTreeMap<NaiveDate, BTreeMap<String, Group>> = BTreeMap::new();

    for interval in intervals.iter().filter(|i| !i.is_day_start()) {
        let group = days.entry(interval.day).or_default().entry(interval.project.clone()).or_default();
        for task in interval.tasks() {
            group.labels.push(task);
        }
        group.duration += round(interval.duration, round_to_minutes);
    }

    days.into_iter()
        .map(|(date, projects)| {
            let rows: Vec<DayRow> = projects
                .into_iter()
                .map(|(project, group)| DayRow {
                    project,
                    tasks: group.labels.joined(),
                    duration: group.duration,
                })
                .collect();
            let total = rows.iter().map(|r| r.duration).sum();
            DayGroup { date, rows, total }
        })
        .collect()
}

pub fn aggregate_by_entry<Tz: TimeZone>(intervals: &[Interval], round_to_minutes: i64, tz: &Tz) -> EntryReport {
    let rows: Vec<EntryRow> = intervals
        .iter()
        .filter(|i| !i.is_day_start())
        .map(|interval| EntryRow {
            id: interval.id,
            date: interval.start().with_timezone(tz).date_naive(),
            start: interval.start(),
            end: interval.end,
            duration: round(interval.duration, round_to_minutes),
            project: interval.project.clone(),
            tasks: interval.task_string(),
            note: interval.note.clone(),
            pushed: interval
                .ticket()
                .map(|_| interval.pushed().unwrap_or("No").to_string()),
        })
        .collect();

    let has_tickets = rows.iter().any(|r| r.pushed.is_some());
    EntryReport { rows, has_tickets }
}

pub fn totals(intervals: &[Interval], round_to_minutes: i64) -> Totals {
    intervals
        .iter()
        .filter(|i| !i.is_day_start())
        .fold(Totals::default(), |mut acc, interval| {
            let rounded = round(interval.duration, round_to_minutes);
            if interval.is_break() {
                acc.break_time += rounded;
            } else {
                acc.work += rounded;
            }
            acc
        })
}
