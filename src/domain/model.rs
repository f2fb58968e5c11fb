use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hourly period of the Spanish 2.0TD access tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TariffPeriod {
    Valle,
    Llano,
    Punta,
}

impl TariffPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            TariffPeriod::Valle => "Hora Valle (la más barata)",
            TariffPeriod::Llano => "Hora Llano (precio intermedio)",
            TariffPeriod::Punta => "Hora Punta (la más cara)",
        }
    }
}

impl fmt::Display for TariffPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodReason {
    Weekend,
    Holiday,
    Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub at: NaiveDateTime,
    pub period: TariffPeriod,
    pub reason: PeriodReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub report: PeriodReport,
    pub message: String,
    /// True only when the notifier accepted the message.
    pub notified: bool,
    pub changed: bool,
}
