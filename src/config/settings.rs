use crate::adapters::telegram::DEFAULT_API_BASE;
use crate::config::toml_config::{LogFormat, TomlConfig};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_STATE_PATH: &str = "last_output.txt";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Values the command line can override on top of the file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub state_path: Option<String>,
    pub no_notify: bool,
    pub log_format: Option<LogFormat>,
}

/// Effective configuration after merging CLI > TOML > environment > defaults.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub notifications_enabled: bool,
    #[serde(skip_serializing)]
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: String,
    pub timeout_seconds: u64,
    pub state_path: String,
    pub national_holidays: bool,
    pub extra_holidays: Vec<NaiveDate>,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            bot_token: None,
            chat_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            state_path: DEFAULT_STATE_PATH.to_string(),
            national_holidays: true,
            extra_holidays: Vec::new(),
            log_format: LogFormat::Compact,
        }
    }
}

impl Settings {
    /// Merges the layers. `env` is injected so tests don't depend on the process environment.
    pub fn resolve<F>(file: Option<TomlConfig>, overrides: Overrides, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let defaults = Settings::default();

        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Self {
            notifications_enabled: !overrides.no_notify
                && file
                    .telegram
                    .enabled
                    .unwrap_or(defaults.notifications_enabled),
            bot_token: non_empty(file.telegram.bot_token).or_else(|| non_empty(env(BOT_TOKEN_ENV))),
            chat_id: non_empty(file.telegram.chat_id).or_else(|| non_empty(env(CHAT_ID_ENV))),
            api_base: file.telegram.api_base.unwrap_or(defaults.api_base),
            timeout_seconds: file
                .telegram
                .timeout_seconds
                .unwrap_or(defaults.timeout_seconds),
            state_path: overrides
                .state_path
                .or(file.state.path)
                .unwrap_or(defaults.state_path),
            national_holidays: file
                .calendar
                .national_holidays
                .unwrap_or(defaults.national_holidays),
            extra_holidays: file.calendar.extra_holidays,
            log_format: overrides
                .log_format
                .or(file.logging.format)
                .unwrap_or(defaults.log_format),
        }
    }

    pub fn from_env(file: Option<TomlConfig>, overrides: Overrides) -> Self {
        Self::resolve(file, overrides, |key| std::env::var(key).ok())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("state.path", &self.state_path)?;
        validation::validate_range("telegram.timeout_seconds", self.timeout_seconds, 1, 120)?;

        if self.notifications_enabled {
            validation::validate_url("telegram.api_base", &self.api_base)?;

            let token = validation::validate_required_field("telegram.bot_token", &self.bot_token)?;
            validation::validate_non_empty_string("telegram.bot_token", token)?;
            validation::validate_no_placeholder("telegram.bot_token", token)?;

            let chat_id = validation::validate_required_field("telegram.chat_id", &self.chat_id)?;
            validation::validate_non_empty_string("telegram.chat_id", chat_id)?;
            validation::validate_no_placeholder("telegram.chat_id", chat_id)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    fn bot_token(&self) -> Option<&str> {
        self.bot_token.as_deref()
    }

    fn chat_id(&self) -> Option<&str> {
        self.chat_id.as_deref()
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn state_path(&self) -> &str {
        &self.state_path
    }

    fn national_holidays(&self) -> bool {
        self.national_holidays
    }

    fn extra_holidays(&self) -> &[NaiveDate] {
        &self.extra_holidays
    }
}
