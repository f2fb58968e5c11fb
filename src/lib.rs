pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod recipe;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileStateRepository, LogNotifier, TelegramNotifier};
pub use config::settings::{Overrides, Settings};
pub use config::toml_config::{LogFormat, TomlConfig};
pub use core::service::NotificationService;
pub use domain::calendar::SpainHolidayProvider;
pub use domain::model::{PeriodReport, RunOutcome, TariffPeriod};
pub use domain::tariff::PeriodCalculator;
pub use recipe::{BaseImage, ContainerRecipe, Variant};
pub use utils::error::{PrecioLuzError, Result};
