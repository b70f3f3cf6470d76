use crate::{
    db::entries::{Entries, EntryUpdate},
    libs::{config::Config, datetime::resolve_at, error::TrackerError, messages::Message, sections::display_project},
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct StretchArgs {
    /// New time for the last entry, defaults to now
    #[arg(long)]
    at: Option<String>,
}

pub fn cmd(args: StretchArgs) -> Result<()> {
    let report = Config::read()?.report();
    let entries = Entries::new()?;
    let last = entries.last()?.ok_or(TrackerError::NoEntries)?;
    let at = resolve_at(args.at.as_deref())?;

    let format = format!("%Y-%m-%d {}", report.time_format());
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(
            Message::ConfirmStretch(
                display_project(&last.project),
                last.timestamp.with_timezone(&Local).format(&format).to_string(),
                at.with_timezone(&Local).format(&format).to_string(),
            )
            .to_string(),
        )
        .default(true)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    entries.update_fields(
        last.id,
        &EntryUpdate {
            timestamp: Some(at),
            ..Default::default()
        },
    )?;
    msg_success!(Message::EntryUpdated(last.id));
    Ok(())
}
