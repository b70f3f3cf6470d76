//! Application configuration stored as `config.json` in the data directory.
//!
//! A missing file means defaults everywhere, so the tool works without any
//! setup. `chronolog init` walks through the sections interactively and
//! writes the result back.
//!
//! ```json
//! {
//!   "report": { "round_to_minutes": 15, "week_start": "Monday" },
//!   "favorites": [
//!     { "favorite": "website+deploy", "ticket": "WEB-12", "require_note": true }
//!   ],
//!   "jira": { "username": "me@example.com", "api_url": "https://example.atlassian.net" }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::api::jira::JiraConfig;
use crate::libs::error::TrackerError;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use chrono::Weekday;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section that can be picked in the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Report layout and duration display settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Rounding granularity in minutes, 0 disables rounding.
    pub round_to_minutes: i64,
    pub show_by_day_totals: bool,
    pub split_work_from_break_time: bool,
    pub display_time_in_24h_format: bool,
    pub display_hms_abbreviated: bool,
    /// Ask for a note on every `add` that has none.
    pub require_note: bool,
    pub week_start: String,
    pub by_project: bool,
    pub by_task: bool,
    pub by_entry: bool,
    pub by_day: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            round_to_minutes: 15,
            show_by_day_totals: true,
            split_work_from_break_time: false,
            display_time_in_24h_format: false,
            display_hms_abbreviated: false,
            require_note: false,
            week_start: "Sunday".to_string(),
            by_project: true,
            by_task: true,
            by_entry: true,
            by_day: true,
        }
    }
}

impl ReportConfig {
    pub fn week_start(&self) -> Result<Weekday, TrackerError> {
        self.week_start
            .trim()
            .parse::<Weekday>()
            .map_err(|_| TrackerError::InvalidWeekday(self.week_start.clone()))
    }

    /// `strftime` pattern for clock times in tables.
    pub fn time_format(&self) -> &'static str {
        if self.display_time_in_24h_format {
            "%H:%M"
        } else {
            "%-I:%M%P"
        }
    }

    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "report".to_string(),
            name: "Report".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleReport);
        let theme = ColorfulTheme::default();

        Ok(Self {
            round_to_minutes: Input::with_theme(&theme)
                .with_prompt(Message::PromptRoundToMinutes.to_string())
                .default(default.round_to_minutes)
                .interact_text()?,
            week_start: Input::with_theme(&theme)
                .with_prompt(Message::PromptWeekStart.to_string())
                .default(default.week_start)
                .validate_with(|input: &String| input.trim().parse::<Weekday>().map(|_| ()).map_err(|_| Message::InvalidWeekday(input.clone()).to_string()))
                .interact_text()?,
            require_note: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptRequireNote.to_string())
                .default(default.require_note)
                .interact()?,
            split_work_from_break_time: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptSplitWorkFromBreak.to_string())
                .default(default.split_work_from_break_time)
                .interact()?,
            show_by_day_totals: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptShowByDayTotals.to_string())
                .default(default.show_by_day_totals)
                .interact()?,
            display_time_in_24h_format: Confirm::with_theme(&theme)
                .with_prompt(Message::Prompt24hFormat.to_string())
                .default(default.display_time_in_24h_format)
                .interact()?,
            display_hms_abbreviated: Confirm::with_theme(&theme)
                .with_prompt(Message::PromptHmsAbbreviated.to_string())
                .default(default.display_hms_abbreviated)
                .interact()?,
            ..default
        })
    }
}

/// Preconfigured `project+task` that `add --favorite N` expands.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Favorite {
    pub favorite: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ticket: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default)]
    pub require_note: bool,
}

impl Favorite {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "favorites".to_string(),
            name: "Favorites".to_string(),
        }
    }

    /// Prompts for new favorites until an empty `project+task` is entered.
    pub fn init(existing: &[Favorite]) -> Result<Vec<Favorite>> {
        let theme = ColorfulTheme::default();
        let mut favorites = existing.to_vec();
        msg_print!(Message::ConfigModuleFavorites(favorites.len()));

        if !favorites.is_empty()
            && Confirm::with_theme(&theme)
                .with_prompt(Message::PromptClearFavorites.to_string())
                .default(false)
                .interact()?
        {
            favorites.clear();
        }

        loop {
            let favorite: String = Input::with_theme(&theme)
                .with_prompt(Message::PromptFavorite.to_string())
                .allow_empty(true)
                .interact_text()?;
            if favorite.trim().is_empty() {
                break;
            }
            let description: String = Input::with_theme(&theme)
                .with_prompt(Message::PromptFavoriteDescription.to_string())
                .allow_empty(true)
                .interact_text()?;
            let ticket: String = Input::with_theme(&theme)
                .with_prompt(Message::PromptFavoriteTicket.to_string())
                .allow_empty(true)
                .interact_text()?;
            let url: String = Input::with_theme(&theme)
                .with_prompt(Message::PromptFavoriteUrl.to_string())
                .allow_empty(true)
                .interact_text()?;
            let require_note = Confirm::with_theme(&theme)
                .with_prompt(Message::PromptRequireNote.to_string())
                .default(false)
                .interact()?;

            favorites.push(Favorite {
                favorite: favorite.trim().to_string(),
                description,
                ticket: ticket.trim().to_string(),
                url: url.trim().to_string(),
                require_note,
            });
        }

        Ok(favorites)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Overrides the database location, defaults to `chronolog.db` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub favorites: Vec<Favorite>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira: Option<JiraConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Report settings, falling back to defaults when the section is absent.
    pub fn report(&self) -> ReportConfig {
        self.report.clone().unwrap_or_default()
    }

    /// Favorite by its 1-based position, as listed by `show --favorites`.
    pub fn favorite(&self, index: usize) -> Result<&Favorite, TrackerError> {
        index
            .checked_sub(1)
            .and_then(|i| self.favorites.get(i))
            .ok_or(TrackerError::FavoriteNotFound(index))
    }

    /// Interactive setup of the selected sections.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "database".to_string(),
                name: "Database".to_string(),
            },
            ReportConfig::module(),
            Favorite::module(),
            JiraConfig::module(),
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "database" => {
                    msg_print!(Message::ConfigModuleDatabase);
                    let file: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabaseFile.to_string())
                        .default(config.database_file.clone().unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    config.database_file = Some(file).filter(|f| !f.trim().is_empty());
                }
                "report" => config.report = Some(ReportConfig::init(&config.report)?),
                "favorites" => config.favorites = Favorite::init(&config.favorites)?,
                "jira" => config.jira = Some(JiraConfig::init(&config.jira)?),
                _ => {}
            }
        }

        Ok(config)
    }
}
