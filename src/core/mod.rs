pub mod service;

pub use crate::domain::model::{PeriodReport, RunOutcome, TariffPeriod};
pub use crate::domain::ports::{ConfigProvider, HolidayProvider, Notifier, StateRepository};
pub use crate::utils::error::Result;
