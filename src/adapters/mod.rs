// Adapters layer: concrete implementations of the domain ports.

pub mod logging;
pub mod state;
pub mod telegram;

pub use logging::LogNotifier;
pub use state::FileStateRepository;
pub use telegram::TelegramNotifier;

use crate::domain::calendar::SpainHolidayProvider;
use crate::domain::ports::{ConfigProvider, Notifier};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::time::Duration;

/// Telegram when notifications are enabled, otherwise a notifier that only logs.
pub fn notifier_from_config<C: ConfigProvider>(config: &C) -> Result<Box<dyn Notifier>> {
    if !config.notifications_enabled() {
        tracing::info!("Telegram notifications disabled");
        return Ok(Box::new(LogNotifier));
    }

    let token = config.bot_token();
    let chat_id = config.chat_id();
    let notifier = TelegramNotifier::new(
        config.api_base(),
        *validate_required_field("telegram.bot_token", &token)?,
        *validate_required_field("telegram.chat_id", &chat_id)?,
        Duration::from_secs(config.timeout_seconds()),
    )?;
    Ok(Box::new(notifier))
}

pub fn holidays_from_config<C: ConfigProvider>(config: &C) -> SpainHolidayProvider {
    SpainHolidayProvider::new()
        .with_national_holidays(config.national_holidays())
        .with_extra_holidays(config.extra_holidays().iter().copied())
}

pub fn state_from_config<C: ConfigProvider>(config: &C) -> FileStateRepository {
    FileStateRepository::new(config.state_path())
}
