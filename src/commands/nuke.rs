//! Bulk deletion of entries.
//!
//! Deleting is all or nothing and needs three confirmations. With
//! `--archive` the doomed rows are first written, joined with their
//! properties, to a CSV file in the working directory.

use crate::{
    db::entries::{ArchiveOptions, Entries, PurgeScope},
    libs::messages::Message,
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NukeArgs {
    /// Delete every entry
    #[arg(long, conflicts_with = "prior_years", required_unless_present = "prior_years")]
    all: bool,

    /// Delete entries from before the current year
    #[arg(long)]
    prior_years: bool,

    /// Only report how many entries would be deleted
    #[arg(long)]
    dry_run: bool,

    /// Write the deleted entries to a CSV file first
    #[arg(long)]
    archive: bool,

    /// Gzip the archive
    #[arg(long, requires = "archive")]
    compress: bool,
}

pub fn cmd(args: NukeArgs) -> Result<()> {
    let scope = if args.all {
        PurgeScope::All
    } else {
        PurgeScope::PriorYears(Local::now().year())
    };
    let entries = Entries::new()?;

    let count = entries.count_purgeable(scope)?;
    if count == 0 {
        msg_info!(Message::NothingToPurge);
        return Ok(());
    }
    if args.dry_run {
        msg_info!(Message::PurgeDryRun(count));
        return Ok(());
    }

    let prompts = [
        Message::ConfirmPurge(count),
        Message::ConfirmPurgeIrreversible,
        Message::ConfirmPurgeFinal,
    ];
    for prompt in prompts {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let archive = args.archive.then(|| ArchiveOptions {
        path: archive_path(),
        compress: args.compress,
    });
    let outcome = entries.bulk_delete(scope, archive.as_ref())?;

    if let Some(path) = outcome.archive {
        msg_success!(Message::ArchiveWritten(path.display().to_string()));
    }
    msg_success!(Message::EntriesPurged(outcome.deleted));
    Ok(())
}

fn archive_path() -> PathBuf {
    PathBuf::from(format!("chronolog_archive_{}.csv", Local::now().format("%Y%m%d%H%M%S")))
}
