//! User-facing text for every [`Message`].
//!
//! All wording lives here so commands only pick a variant and its
//! parameters.

use super::types::Message;
use chrono::Datelike;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let text = match self {
            // === ENTRY MESSAGES ===
            Message::Greeting(greeting) => format!("{}! Your day has started", greeting),
            Message::AlreadyStarted(date) => format!("The day {} has already been started", date),
            Message::EntryAdded(project, tasks) => format!("Added {} ({})", project, tasks),
            Message::BreakAdded => "Break added".to_string(),
            Message::NothingAdded => "Nothing added, a note is required".to_string(),
            Message::EntryUpdated(id) => format!("Entry {} updated", id),
            Message::NoEntriesToday => "There are no entries for today".to_string(),
            Message::NoChangesDetected => "No changes detected".to_string(),
            Message::ConfirmAmend => "Save these changes?".to_string(),
            Message::ConfirmStretch(project, old, new) => format!("Stretch '{}' from {} to {}?", project, old, new),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === FAVORITE MESSAGES ===
            Message::NoFavorites => "No favorites configured, add some with 'chronolog init'".to_string(),
            Message::FavoritesHeader => "Favorites".to_string(),

            // === REPORT MESSAGES ===
            Message::ReportHeader(from, to) => {
                if from == to {
                    format!("Report for {} (week {})", from.format("%A, %Y-%m-%d"), from.iso_week().week())
                } else {
                    format!(
                        "Report for {} .. {} (weeks {} to {})",
                        from.format("%Y-%m-%d"),
                        to.format("%Y-%m-%d"),
                        from.iso_week().week(),
                        to.iso_week().week()
                    )
                }
            }
            Message::NoEntriesInWindow => "No entries in this period".to_string(),
            Message::SinceLastEntry(duration) => format!("Time since last entry: {}", duration),
            Message::TotalTime(compact, long) => format!("Total Time: {}{}", compact, long),
            Message::TotalWorkingTime(compact, long) => format!("Total Working Time: {}{}", compact, long),
            Message::TotalBreakTime(compact) => format!("  Total Break Time: {}", compact),
            Message::SectionByProject => "By Project".to_string(),
            Message::SectionByTask => "By Task".to_string(),
            Message::SectionByEntry => "By Entry".to_string(),
            Message::SectionByDay => "By Day".to_string(),
            Message::StatisticsHeader => "Statistics".to_string(),

            // === PUSH MESSAGES ===
            Message::NothingToPush => "Nothing to push".to_string(),
            Message::UnpushedHeader(count) => format!("{} unpushed entries", count),
            Message::PushPreviewHeader(count) => format!("{} worklogs ready to push:", count),
            Message::PushPreviewItem(id, url, duration) => format!("  #{} {} {}", id, url, duration),
            Message::ConfirmPush(count) => format!("Push {} worklogs to Jira?", count),
            Message::EntryPushed(id, ticket) => format!("Entry {} pushed to {}", id, ticket),
            Message::PushCompleted(count) => format!("{} worklogs pushed", count),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Report exported to {}", path),

            // === MAINTENANCE MESSAGES ===
            Message::NothingToPurge => "No entries match, nothing to delete".to_string(),
            Message::PurgeDryRun(count) => format!("{} entries would be deleted", count),
            Message::ConfirmPurge(count) => format!("Delete {} entries?", count),
            Message::ConfirmPurgeIrreversible => "This cannot be undone. Continue?".to_string(),
            Message::ConfirmPurgeFinal => "Last chance. Really delete them?".to_string(),
            Message::ArchiveWritten(path) => format!("Archive written to {}", path),
            Message::EntriesPurged(count) => format!("{} entries deleted", count),
            Message::BackupCreated(path) => format!("Backup created at {}", path),
            Message::BackupExists(path) => format!("Backup file {} already exists", path),
            Message::DatabaseNotFound(path) => format!("Database file {} not found", path),

            // === CONFIG MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigNotFound => "No configuration file found".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleReport => "Report settings".to_string(),
            Message::ConfigModuleFavorites(count) => format!("Favorites ({} configured)", count),
            Message::ConfigModuleJira => "Jira settings".to_string(),
            Message::InvalidWeekday(value) => format!("'{}' is not a weekday", value),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptDatabaseFile => "Database file (empty for the default location)".to_string(),
            Message::PromptRoundToMinutes => "Round durations to minutes (0 disables)".to_string(),
            Message::PromptWeekStart => "First day of the week".to_string(),
            Message::PromptRequireNote => "Require a note".to_string(),
            Message::PromptSplitWorkFromBreak => "Show work and break totals separately".to_string(),
            Message::PromptShowByDayTotals => "Show daily totals".to_string(),
            Message::Prompt24hFormat => "Use 24-hour time".to_string(),
            Message::PromptHmsAbbreviated => "Abbreviate durations (1h 2m 3s)".to_string(),
            Message::PromptClearFavorites => "Remove the existing favorites first".to_string(),
            Message::PromptFavorite => "Favorite project+task (empty to finish)".to_string(),
            Message::PromptFavoriteDescription => "Description".to_string(),
            Message::PromptFavoriteTicket => "Jira ticket".to_string(),
            Message::PromptFavoriteUrl => "URL".to_string(),
            Message::PromptJiraUsername => "Enter your Jira username".to_string(),
            Message::PromptJiraApiUrl => "Enter the Jira URL".to_string(),
            Message::PromptJiraApiKey => "Enter your Jira API token".to_string(),
            Message::PromptSelectFavorite => "Select a favorite".to_string(),
            Message::PromptSelectEntry => "Select an entry".to_string(),
            Message::PromptProject => "Project".to_string(),
            Message::PromptTask => "Task (several separated by +)".to_string(),
            Message::PromptNote => "Note".to_string(),
            Message::PromptUrl => "URL".to_string(),
            Message::PromptDateTime => "Date and time".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationHistoryItem(version, name, applied_at) => format!("  v{}: {} (applied: {})", version, name, applied_at),
        };

        write!(f, "{}", text)
    }
}
