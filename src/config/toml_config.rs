use crate::utils::error::{PrecioLuzError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub telegram: TelegramConfig,
    pub state: StateConfig,
    pub calendar: CalendarConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelegramConfig {
    pub enabled: Option<bool>,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    pub national_holidays: Option<bool>,
    pub extra_holidays: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PrecioLuzError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PrecioLuzError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of `VAR`. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(api_base) = &self.telegram.api_base {
            validation::validate_url("telegram.api_base", api_base)?;
        }
        if let Some(timeout) = self.telegram.timeout_seconds {
            validation::validate_range("telegram.timeout_seconds", timeout, 1, 120)?;
        }
        if let Some(path) = &self.state.path {
            validation::validate_path("state.path", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[telegram]
enabled = true
bot_token = "123:abc"
chat_id = "-100200"
api_base = "https://api.telegram.org"
timeout_seconds = 15

[state]
path = "/data/last_output.txt"

[calendar]
national_holidays = true
extra_holidays = ["2026-03-19", "2026-05-15"]

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.telegram.chat_id.as_deref(), Some("-100200"));
        assert_eq!(config.telegram.timeout_seconds, Some(15));
        assert_eq!(config.state.path.as_deref(), Some("/data/last_output.txt"));
        assert_eq!(config.calendar.extra_holidays.len(), 2);
        assert_eq!(config.logging.format, Some(LogFormat::Json));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.telegram.bot_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PRECIO_LUZ_TEST_CHAT", "42");

        let toml_content = r#"
[telegram]
chat_id = "${PRECIO_LUZ_TEST_CHAT}"
bot_token = "${PRECIO_LUZ_TEST_UNSET_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.telegram.chat_id.as_deref(), Some("42"));
        assert_eq!(
            config.telegram.bot_token.as_deref(),
            Some("${PRECIO_LUZ_TEST_UNSET_TOKEN}")
        );

        std::env::remove_var("PRECIO_LUZ_TEST_CHAT");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[telegram]
api_base = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[telegram]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = TomlConfig::from_toml_str(
            r#"
[telegram]
chatid = "1"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, PrecioLuzError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[state]\npath = \"./state/last.txt\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.state.path.as_deref(), Some("./state/last.txt"));
    }
}
