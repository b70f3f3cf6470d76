//! Time reports over a calendar window.
//!
//! Entries of the window are turned into intervals, rounded, and printed as
//! totals followed by the sections enabled in the report configuration. The
//! same tables can be exported to a file, and ticketed intervals can be pushed
//! to Jira as worklogs.

use crate::{
    api::jira::Jira,
    db::entries::{day_bounds, Entries},
    libs::{
        config::{Config, ReportConfig},
        datetime::{parse_date, today, ReportWindow},
        error::TrackerError,
        export::{ExportFormat, Exporter},
        formatter::DurationFormatter,
        interval::reconstruct_intervals,
        messages::Message,
        push::{build_push_payloads, push_all, PushRequest},
        sections::build_report,
        view::View,
    },
    msg_debug, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report for today (default)
    #[arg(long, group = "window")]
    today: bool,

    #[arg(long, group = "window")]
    yesterday: bool,

    /// Report for a single day: YYYY-MM-DD, today or yesterday
    #[arg(short, long, group = "window")]
    date: Option<String>,

    /// First day of a range, used together with --to
    #[arg(long, requires = "to", group = "window")]
    from: Option<String>,

    /// Last day of a range (inclusive)
    #[arg(long, requires = "from")]
    to: Option<String>,

    #[arg(long, group = "window")]
    current_week: bool,

    #[arg(long, group = "window")]
    previous_week: bool,

    /// Only show the most recent entry and the time since it
    #[arg(long, group = "window")]
    last_entry: bool,

    /// Limit the report to one project
    #[arg(short, long)]
    project: Option<String>,

    /// Report raw durations
    #[arg(long)]
    no_rounding: bool,

    /// Push ticketed, unpushed time to Jira
    #[arg(long)]
    push: bool,

    /// Also write the report to a file
    #[arg(short, long)]
    export: bool,

    #[arg(long, value_enum, default_value_t = ExportFormat::Csv, requires = "export")]
    export_type: ExportFormat,

    /// Export file path, defaults to a timestamped file in the working directory
    #[arg(short, long, requires = "export")]
    output: Option<PathBuf>,
}

impl ReportArgs {
    fn window(&self, today: NaiveDate) -> Result<ReportWindow> {
        let window = if self.yesterday {
            ReportWindow::Yesterday
        } else if let Some(date) = &self.date {
            ReportWindow::Date(parse_date(date, today)?)
        } else if let (Some(from), Some(to)) = (&self.from, &self.to) {
            ReportWindow::Range(parse_date(from, today)?, parse_date(to, today)?)
        } else if self.current_week {
            ReportWindow::CurrentWeek
        } else if self.previous_week {
            ReportWindow::PreviousWeek
        } else {
            ReportWindow::Today
        };
        Ok(window)
    }
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let config = Config::read()?;
    let report = config.report();
    let entries = Entries::new()?;

    if args.last_entry {
        return last_entry(&entries, &report);
    }

    let today = today();
    let (from, to) = args.window(today)?.bounds(today, report.week_start()?);
    let (start, end) = day_bounds(from, to, &Local)?;
    msg_debug!(format!("Report window {} .. {}", start, end));

    let events = entries.fetch_range(&start, &end, None)?;
    msg_debug!(format!("Loaded {} entries", events.len()));

    let mut intervals = reconstruct_intervals(&events, &Local);
    // Filtering after reconstruction keeps durations measured against every entry.
    if let Some(project) = &args.project {
        intervals.retain(|i| i.project.eq_ignore_ascii_case(project));
    }
    msg_debug!(format!("Reconstructed {} intervals: {:?}", intervals.len(), intervals));

    let round_to_minutes = if args.no_rounding { 0 } else { report.round_to_minutes };
    let output = build_report(&intervals, &report, round_to_minutes, &Local);

    msg_print!(Message::ReportHeader(from, to), true);
    for line in &output.totals {
        msg_print!(line);
    }
    if events.is_empty() {
        msg_info!(Message::NoEntriesInWindow);
    }
    for table in &output.tables {
        View::table(table)?;
    }

    if args.export {
        Exporter::new(args.export_type, args.output.clone()).export(&output.tables)?;
    }

    if args.push {
        let requests = build_push_payloads(&intervals, round_to_minutes);
        push(&config, &entries, &requests, &report).await?;
    }

    Ok(())
}

async fn push(config: &Config, entries: &Entries, requests: &[PushRequest], report: &ReportConfig) -> Result<()> {
    let jira_config = config.jira.as_ref().ok_or(TrackerError::MissingPushConfig)?;
    if requests.is_empty() {
        msg_info!(Message::NothingToPush);
        return Ok(());
    }

    let formatter = DurationFormatter::from_config(report);
    msg_print!(Message::PushPreviewHeader(requests.len()), true);
    for request in requests {
        msg_print!(Message::PushPreviewItem(
            request.entry_id,
            jira_config.browse_url(&request.ticket),
            formatter.format(request.payload.time_spent_seconds, true),
        ));
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmPush(requests.len()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let jira = Jira::new(jira_config)?;
    let pushed = push_all(&jira, entries, requests).await?;
    msg_success!(Message::PushCompleted(pushed));
    Ok(())
}

fn last_entry(entries: &Entries, report: &ReportConfig) -> Result<()> {
    let last = entries.last()?.ok_or(TrackerError::NoEntries)?;
    View::entries(std::slice::from_ref(&last), report)?;

    let elapsed = (Utc::now() - last.timestamp).num_seconds();
    let formatter = DurationFormatter::new(report.round_to_minutes.max(1), report.display_hms_abbreviated);
    msg_print!(Message::SinceLastEntry(formatter.format(elapsed, true)));
    Ok(())
}
