use crate::{
    db::entries::Entries,
    libs::{
        config::{Config, ReportConfig},
        entry::PointEvent,
        formatter::DurationFormatter,
        messages::Message,
        sections::display_project,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// List the configured favorites
    #[arg(short, long)]
    favorites: bool,

    /// Summary of the stored entries
    #[arg(short, long)]
    statistics: bool,

    /// Ticketed entries not pushed to Jira yet
    #[arg(short, long)]
    unpushed: bool,
}

pub fn cmd(args: ShowArgs) -> Result<()> {
    let config = Config::read()?;
    let report = config.report();
    let show_all = !args.favorites && !args.statistics && !args.unpushed;

    if args.favorites || show_all {
        if config.favorites.is_empty() {
            msg_info!(Message::NoFavorites);
        } else {
            msg_print!(Message::FavoritesHeader, true);
            View::favorites(&config.favorites, config.jira.as_ref())?;
        }
    }

    if args.statistics || show_all {
        let entries = Entries::new()?;
        let first = entries.first()?;
        let last = entries.last()?;
        let count = entries.count()?;
        msg_print!(Message::StatisticsHeader, true);
        View::statistics(&statistics(first.as_ref(), last.as_ref(), count, &report))?;
    }

    if args.unpushed {
        let unpushed = Entries::new()?.unpushed()?;
        if unpushed.is_empty() {
            msg_info!(Message::NothingToPush);
        } else {
            msg_print!(Message::UnpushedHeader(unpushed.len()), true);
            View::entries(&unpushed, &report)?;
        }
    }

    Ok(())
}

/// Label/value rows: first and last entry, record count and the span between them.
pub fn statistics(first: Option<&PointEvent>, last: Option<&PointEvent>, count: i64, report: &ReportConfig) -> Vec<(String, String)> {
    let format = format!("%Y-%m-%d {}", report.time_format());
    let describe = |event: Option<&PointEvent>| match event {
        Some(e) => format!("{} ({})", e.timestamp.with_timezone(&Local).format(&format), display_project(&e.project)),
        None => "-".to_string(),
    };
    let span = match (first, last) {
        (Some(first), Some(last)) => {
            DurationFormatter::new(report.round_to_minutes, report.display_hms_abbreviated)
                .format((last.timestamp - first.timestamp).num_seconds(), false)
        }
        _ => "-".to_string(),
    };

    vec![
        ("First entry".to_string(), describe(first)),
        ("Last entry".to_string(), describe(last)),
        ("Total records".to_string(), count.to_string()),
        ("Time span".to_string(), span),
    ]
}
