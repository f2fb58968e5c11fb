pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::LogFormat;
#[cfg(feature = "cli")]
use chrono::NaiveDateTime;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "precio-luz")]
#[command(
    about = "Tells you which 2.0TD electricity tariff period is in force and notifies on change"
)]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Where the last sent message is stored
    #[arg(long)]
    pub state_file: Option<String>,

    /// Print the period but do not send a Telegram message
    #[arg(long)]
    pub no_notify: bool,

    /// Evaluate this local time instead of now (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_local_datetime)]
    pub at: Option<NaiveDateTime>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn overrides(&self) -> settings::Overrides {
        settings::Overrides {
            state_path: self.state_file.clone(),
            no_notify: self.no_notify,
            log_format: self.log_format,
        }
    }
}

#[cfg(feature = "cli")]
fn parse_local_datetime(value: &str) -> std::result::Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| format!("'{}' is not a local date-time like 2026-03-02T09:30:00", value))
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_flags() {
        let cli = CliConfig::parse_from([
            "precio-luz",
            "--config",
            "precio-luz.toml",
            "--no-notify",
            "--at",
            "2026-03-02T09:30:00",
            "--log-format",
            "json",
        ]);

        assert_eq!(cli.config.as_deref(), Some("precio-luz.toml"));
        assert!(cli.no_notify);
        assert_eq!(cli.at.unwrap().to_string(), "2026-03-02 09:30:00");
        assert_eq!(cli.overrides().log_format, Some(LogFormat::Json));
    }

    #[test]
    fn test_parse_local_datetime_formats() {
        assert!(parse_local_datetime("2026-03-02 09:30").is_ok());
        assert!(parse_local_datetime("2026-03-02T09:30").is_ok());
        assert!(parse_local_datetime("09:30").is_err());
    }
}
