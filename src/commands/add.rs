//! Logs a finished activity.
//!
//! The entry is stamped with the end time; its duration is whatever elapsed
//! since the previous entry. Favorites from the config can stand in for the
//! `project+task` argument and bring their ticket and url along.

use crate::{
    db::entries::Entries,
    libs::{
        config::{Config, Favorite},
        datetime::resolve_at,
        entry::{HasProperties, NewEntry, PROP_TICKET, PROP_URL},
        messages::Message,
    },
    msg_bail_anyhow, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Select};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Activity as project+task[+task...]
    project_task: Option<String>,

    /// End time of the activity, defaults to now
    #[arg(long)]
    at: Option<String>,

    #[arg(short, long)]
    note: Option<String>,

    /// Use the favorite with this number (see `show --favorites`)
    #[arg(short, long, conflicts_with = "project_task")]
    favorite: Option<usize>,

    /// Jira issue key to push this time to
    #[arg(short, long)]
    ticket: Option<String>,

    #[arg(short, long)]
    url: Option<String>,
}

pub fn cmd(args: AddArgs) -> Result<()> {
    let config = Config::read()?;
    let report = config.report();
    let at = resolve_at(args.at.as_deref())?;

    let favorite = match (args.favorite, &args.project_task) {
        (Some(index), _) => Some(config.favorite(index)?.clone()),
        (None, None) => Some(select_favorite(&config.favorites)?),
        (None, Some(_)) => None,
    };
    let favorite = favorite.unwrap_or_default();
    let project_task = args.project_task.clone().unwrap_or_else(|| favorite.favorite.clone());

    let mut note = args.note.clone().unwrap_or_default();
    if note.trim().is_empty() && (report.require_note || favorite.require_note) {
        note = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptNote.to_string())
            .allow_empty(true)
            .interact_text()?;
        if note.trim().is_empty() {
            msg_warning!(Message::NothingAdded);
            return Ok(());
        }
    }

    let entry = build_entry(&project_task, &note, args.ticket.as_deref(), args.url.as_deref(), &favorite, at)?;
    Entries::new()?.insert(&entry)?;

    msg_success!(Message::EntryAdded(entry.project.clone(), entry.task_string()));
    Ok(())
}

/// Assembles the entry, explicit ticket and url taking precedence over the favorite's.
pub fn build_entry(
    project_task: &str,
    note: &str,
    ticket: Option<&str>,
    url: Option<&str>,
    favorite: &Favorite,
    at: chrono::DateTime<chrono::Utc>,
) -> Result<NewEntry> {
    let entry = NewEntry::from_project_task(project_task, note.trim(), at)?
        .with_property(PROP_TICKET, ticket.unwrap_or(favorite.ticket.as_str()))
        .with_property(PROP_URL, url.unwrap_or(favorite.url.as_str()));
    Ok(entry)
}

fn select_favorite(favorites: &[Favorite]) -> Result<Favorite> {
    if favorites.is_empty() {
        msg_bail_anyhow!(Message::NoFavorites);
    }
    let items: Vec<String> = favorites
        .iter()
        .map(|f| match f.description.is_empty() {
            true => f.favorite.clone(),
            false => format!("{} ({})", f.favorite, f.description),
        })
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectFavorite.to_string())
        .items(&items)
        .default(0)
        .interact()?;
    Ok(favorites[selection].clone())
}
