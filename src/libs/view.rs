use crate::api::jira::JiraConfig;
use crate::libs::config::{Favorite, ReportConfig};
use crate::libs::entry::{HasProperties, PointEvent};
use crate::libs::export::ReportTable;
use crate::libs::sections::display_project;
use anyhow::Result;
use chrono::Local;
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    pub fn table(report_table: &ReportTable) -> Result<()> {
        println!("\n{}", report_table.title);

        report_table.to_table().printstd();

        Ok(())
    }

    pub fn favorites(favorites: &[Favorite], jira: Option<&JiraConfig>) -> Result<()> {
        let has_description = favorites.iter().any(|f| !f.description.is_empty());
        let has_ticket = favorites.iter().any(|f| !f.ticket.is_empty() || !f.url.is_empty());
        let has_note = favorites.iter().any(|f| f.require_note);

        let mut table = Table::new();
        let mut titles = vec![Cell::new("#"), Cell::new("Favorite")];
        if has_description {
            titles.push(Cell::new("Description"));
        }
        if has_ticket {
            titles.push(Cell::new("Ticket / URL"));
        }
        if has_note {
            titles.push(Cell::new("Note required"));
        }
        table.set_titles(Row::new(titles));

        for (i, favorite) in favorites.iter().enumerate() {
            let mut cells = vec![Cell::new(&(i + 1).to_string()), Cell::new(&favorite.favorite)];
            if has_description {
                cells.push(Cell::new(&favorite.description));
            }
            if has_ticket {
                let link = match (favorite.ticket.is_empty(), jira) {
                    (false, Some(jira)) => jira.browse_url(&favorite.ticket),
                    (false, None) => favorite.ticket.clone(),
                    (true, _) => favorite.url.clone(),
                };
                cells.push(Cell::new(&link));
            }
            if has_note {
                cells.push(Cell::new(if favorite.require_note { "Yes" } else { "" }));
            }
            table.add_row(Row::new(cells));
        }
        table.printstd();

        Ok(())
    }

    /// Side-by-side comparison used before an entry is amended.
    pub fn entry_change(old: &PointEvent, new: &PointEvent, config: &ReportConfig) -> Result<()> {
        let format = format!("%Y-%m-%d {}", config.time_format());
        let mut table = Table::new();
        table.set_titles(row!["", "Project", "Task", "Note", "URL", "Time"]);
        for (label, event) in [("Old", old), ("New", new)] {
            table.add_row(row![
                label,
                display_project(&event.project),
                event.task_string(),
                event.note,
                event.url().unwrap_or_default(),
                event.timestamp.with_timezone(&Local).format(&format)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn entries(events: &[PointEvent], config: &ReportConfig) -> Result<()> {
        let format = format!("%Y-%m-%d {}", config.time_format());
        let mut table = Table::new();
        table.set_titles(row!["ID", "Time", "Project", "Tasks", "Ticket", "Note"]);
        for event in events {
            table.add_row(row![
                event.id,
                event.timestamp.with_timezone(&Local).format(&format),
                display_project(&event.project),
                event.task_string(),
                event.ticket().unwrap_or_default(),
                event.note
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn statistics(rows: &[(String, String)]) -> Result<()> {
        let mut table = Table::new();
        for (label, value) in rows {
            table.add_row(row![b -> label, value]);
        }
        table.printstd();

        Ok(())
    }
}
