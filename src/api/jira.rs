use super::WorklogSink;
use crate::libs::config::ConfigModule;
use crate::libs::error::TrackerError;
use crate::libs::messages::Message;
use crate::libs::push::{PushRequest, PushResponse};
use crate::libs::secret::Secret;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SECRET_FILE: &str = ".jira_secret";
const WORKLOG_URL: &str = "rest/api/3/issue";
const BROWSE_URL: &str = "browse";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct JiraConfig {
    pub username: String,
    pub api_url: String,
}

impl JiraConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "jira".to_string(),
            name: "Jira".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleJira);
        let jira = Self {
            username: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraUsername.to_string())
                .default(config.username)
                .interact_text()?,
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
        };
        // Refresh the stored token so a changed account does not keep the old one.
        Self::secret().prompt()?;
        Ok(jira)
    }

    pub fn secret() -> Secret {
        Secret::new(SECRET_FILE, &Message::PromptJiraApiKey.to_string())
    }

    fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn worklog_url(&self, ticket: &str) -> String {
        format!("{}/{}/{}/worklog", self.base_url(), WORKLOG_URL, ticket)
    }

    pub fn browse_url(&self, ticket: &str) -> String {
        format!("{}/{}/{}", self.base_url(), BROWSE_URL, ticket)
    }

    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.api_url.trim().is_empty()
    }
}

#[derive(Debug)]
pub struct Jira {
    client: Client,
    config: JiraConfig,
    api_key: String,
}

impl Jira {
    /// Client for `config`, reading the API token from the encrypted store or prompting for it.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        if !config.is_complete() {
            return Err(TrackerError::MissingPushConfig.into());
        }
        let api_key = JiraConfig::secret().get_or_prompt()?;
        if api_key.trim().is_empty() {
            return Err(TrackerError::MissingPushConfig.into());
        }
        Self::with_api_key(config, &api_key)
    }

    pub fn with_api_key(config: &JiraConfig, api_key: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            config: config.clone(),
            api_key: api_key.to_string(),
        })
    }
}

impl WorklogSink for Jira {
    async fn send(&self, request: &PushRequest) -> Result<PushResponse> {
        let res = self
            .client
            .post(self.config.worklog_url(&request.ticket))
            .basic_auth(&self.config.username, Some(&self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&request.payload)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        Ok(PushResponse { status, body })
    }
}
