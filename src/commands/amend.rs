use crate::{
    db::entries::{Entries, EntryUpdate},
    libs::{
        config::{Config, ReportConfig},
        datetime::{parse_at, today},
        entry::{HasProperties, PointEvent, TASK_DELIMITER},
        error::TrackerError,
        messages::Message,
        sections::display_project,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use chrono::{Local, Utc};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

const EDIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Args)]
pub struct AmendArgs {
    /// Pick one of today's entries instead of the last one
    #[arg(long)]
    today: bool,
}

pub fn cmd(args: AmendArgs) -> Result<()> {
    let report = Config::read()?.report();
    let entries = Entries::new()?;

    let target = if args.today {
        pick_today(&entries, &report)?
    } else {
        entries.last()?.ok_or(TrackerError::NoEntries)?
    };

    let update = prompt_update(&target)?;
    if update.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    View::entry_change(&target, &update.apply_to(&target), &report)?;
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmAmend.to_string())
        .default(true)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    entries.update_fields(target.id, &update)?;
    msg_success!(Message::EntryUpdated(target.id));
    Ok(())
}

fn pick_today(entries: &Entries, report: &ReportConfig) -> Result<PointEvent> {
    let mut todays = entries.fetch_day(today(), &Local)?;
    if todays.is_empty() {
        msg_bail_anyhow!(Message::NoEntriesToday);
    }
    let time_format = report.time_format();
    let items: Vec<String> = todays
        .iter()
        .map(|e| {
            format!(
                "{}  {}  {}",
                e.timestamp.with_timezone(&Local).format(time_format),
                display_project(&e.project),
                e.task_string()
            )
        })
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectEntry.to_string())
        .items(&items)
        .default(items.len() - 1)
        .interact()?;
    Ok(todays.swap_remove(selection))
}

/// Asks for every editable field, keeping the current value as the default.
fn prompt_update(target: &PointEvent) -> Result<EntryUpdate> {
    let theme = ColorfulTheme::default();
    let mut values = AmendValues::from_event(target);

    if !target.is_break() && !target.is_day_start() {
        values.project = Input::with_theme(&theme)
            .with_prompt(Message::PromptProject.to_string())
            .default(values.project)
            .interact_text()?;
        values.task = Input::with_theme(&theme)
            .with_prompt(Message::PromptTask.to_string())
            .default(values.task)
            .interact_text()?;
    }
    values.note = Input::with_theme(&theme)
        .with_prompt(Message::PromptNote.to_string())
        .default(values.note)
        .allow_empty(true)
        .interact_text()?;
    if target.url().is_some() {
        values.url = Input::with_theme(&theme)
            .with_prompt(Message::PromptUrl.to_string())
            .default(values.url)
            .allow_empty(true)
            .interact_text()?;
    }
    values.timestamp = Input::with_theme(&theme)
        .with_prompt(Message::PromptDateTime.to_string())
        .default(values.timestamp)
        .validate_with(|input: &String| {
            parse_at(input, &Utc::now(), &Local)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    values.diff(target)
}

/// Editable fields of an entry as plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct AmendValues {
    pub project: String,
    pub task: String,
    pub note: String,
    pub url: String,
    pub timestamp: String,
}

impl AmendValues {
    pub fn from_event(event: &PointEvent) -> Self {
        Self {
            project: event.project.clone(),
            task: event.tasks().join(&TASK_DELIMITER.to_string()),
            note: event.note.clone(),
            url: event.url().unwrap_or_default().to_string(),
            timestamp: event.timestamp.with_timezone(&Local).format(EDIT_TIME_FORMAT).to_string(),
        }
    }

    /// Only the fields that differ from `event` end up in the update.
    pub fn diff(&self, event: &PointEvent) -> Result<EntryUpdate> {
        let current = Self::from_event(event);
        let changed = |new: &str, old: &str| (new.trim() != old.trim()).then(|| new.trim().to_string());

        let timestamp = match changed(&self.timestamp, &current.timestamp) {
            Some(value) => Some(parse_at(&value, &Utc::now(), &Local)?),
            None => None,
        };

        Ok(EntryUpdate {
            project: changed(&self.project, &current.project).filter(|p| !p.is_empty()),
            note: changed(&self.note, &current.note),
            timestamp,
            task: changed(&self.task, &current.task),
            url: changed(&self.url, &current.url),
        })
    }
}
