//! Turns aggregates into display tables shared by the terminal view and exports.

use crate::libs::config::ReportConfig;
use crate::libs::entry::{BREAK, DAY_START};
use crate::libs::export::ReportTable;
use crate::libs::formatter::{DurationFormatter, DAY};
use crate::libs::interval::Interval;
use crate::libs::messages::Message;
use crate::libs::report::{self, DayGroup, EntryReport, ProjectRow, TaskReport, Totals};
use chrono::TimeZone;

/// Label of the synthetic per-day total row.
pub const TOTAL: &str = "TOTAL";

/// Sentinel projects shown with readable names.
pub fn display_project(project: &str) -> String {
    match project {
        BREAK => "Break".to_string(),
        DAY_START => "Start of day".to_string(),
        other => other.to_string(),
    }
}

pub fn totals_lines(totals: &Totals, config: &ReportConfig, formatter: &DurationFormatter) -> Vec<String> {
    let long_form = |seconds: i64| {
        if seconds > DAY {
            format!(" ({})", formatter.format(seconds, false))
        } else {
            String::new()
        }
    };

    if config.split_work_from_break_time {
        vec![
            Message::TotalWorkingTime(formatter.format(totals.work, true), long_form(totals.work)).to_string(),
            Message::TotalBreakTime(formatter.format(totals.break_time, true)).to_string(),
        ]
    } else {
        let all = totals.all();
        vec![Message::TotalTime(formatter.format(all, true), long_form(all)).to_string()]
    }
}

pub fn project_table(rows: &[ProjectRow], formatter: &DurationFormatter) -> ReportTable {
    let mut table = ReportTable::new(&Message::SectionByProject.to_string(), &["Project", "Tasks", "Duration"]);
    for row in rows {
        table.push_row(vec![display_project(&row.project), row.tasks.clone(), formatter.format(row.duration, true)]);
    }
    table
}

pub fn task_table(report: &TaskReport, formatter: &DurationFormatter) -> ReportTable {
    let headers: &[&str] = if report.has_tickets {
        &["Task", "Project", "Ticket", "Duration"]
    } else {
        &["Task", "Project", "Duration"]
    };
    let mut table = ReportTable::new(&Message::SectionByTask.to_string(), headers);

    for row in &report.rows {
        let mut cells = vec![row.task.clone(), display_project(&row.projects)];
        if report.has_tickets {
            cells.push(row.ticket.clone().unwrap_or_default());
        }
        cells.push(formatter.format(row.duration, true));
        table.push_row(cells);
    }
    table
}

pub fn entry_table<Tz: TimeZone>(report: &EntryReport, config: &ReportConfig, formatter: &DurationFormatter, tz: &Tz) -> ReportTable
where
    Tz::Offset: std::fmt::Display,
{
    let mut headers = vec!["Date", "Start", "End", "Duration", "Project", "Tasks", "Note"];
    if report.has_tickets {
        headers.push("Pushed");
    }
    let mut table = ReportTable::new(&Message::SectionByEntry.to_string(), &headers);
    let time_format = config.time_format();

    for row in &report.rows {
        let mut cells = vec![
            row.date.format("%Y-%m-%d").to_string(),
            row.start.with_timezone(tz).format(time_format).to_string(),
            row.end.with_timezone(tz).format(time_format).to_string(),
            formatter.format(row.duration, true),
            display_project(&row.project),
            row.tasks.clone(),
            row.note.clone(),
        ];
        if report.has_tickets {
            cells.push(row.pushed.clone().unwrap_or_default());
        }
        table.push_row(cells);
    }
    table
}

pub fn day_table(days: &[DayGroup], config: &ReportConfig, formatter: &DurationFormatter) -> ReportTable {
    let mut table = ReportTable::new(&Message::SectionByDay.to_string(), &["Date", "Project", "Tasks", "Duration"]);

    for day in days {
        for (i, row) in day.rows.iter().enumerate() {
            let date = if i == 0 { day.date.format("%Y-%m-%d %a").to_string() } else { String::new() };
            table.push_row(vec![date, display_project(&row.project), row.tasks.clone(), formatter.format(row.duration, true)]);
        }
        if config.show_by_day_totals {
            table.push_row(vec![String::new(), TOTAL.to_string(), String::new(), formatter.format(day.total, true)]);
        }
    }
    table
}

/// Everything a report prints: the totals lines and the enabled sections in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutput {
    pub totals: Vec<String>,
    pub tables: Vec<ReportTable>,
}

/// Runs every aggregation enabled in `config` over `intervals`.
pub fn build_report<Tz: TimeZone>(intervals: &[Interval], config: &ReportConfig, round_to_minutes: i64, tz: &Tz) -> ReportOutput
where
    Tz::Offset: std::fmt::Display,
{
    // "< 0 minutes" reads badly when rounding is off.
    let formatter = DurationFormatter::new(round_to_minutes.max(1), config.display_hms_abbreviated);
    let mut tables = Vec::new();

    if config.by_project {
        tables.push(project_table(&report::aggregate_by_project(intervals, round_to_minutes), &formatter));
    }
    if config.by_task {
        tables.push(task_table(&report::aggregate_by_task(intervals, round_to_minutes), &formatter));
    }
    if config.by_entry {
        tables.push(entry_table(&report::aggregate_by_entry(intervals, round_to_minutes, tz), config, &formatter, tz));
    }
    if config.by_day {
        tables.push(day_table(&report::aggregate_by_day(intervals, round_to_minutes), config, &formatter));
    }

    ReportOutput {
        totals: totals_lines(&report::totals(intervals, round_to_minutes), config, &formatter),
        tables,
    }
}
