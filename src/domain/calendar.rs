use crate::domain::ports::HolidayProvider;
use chrono::{Datelike, Duration, NaiveDate};

// (month, day) national holidays that fall on the same date every year
const FIXED_NATIONAL_HOLIDAYS: [(u32, u32); 9] = [
    (1, 1),   // Año Nuevo
    (1, 6),   // Epifanía del Señor
    (5, 1),   // Fiesta del Trabajo
    (8, 15),  // Asunción de la Virgen
    (10, 12), // Fiesta Nacional de España
    (11, 1),  // Todos los Santos
    (12, 6),  // Día de la Constitución
    (12, 8),  // Inmaculada Concepción
    (12, 25), // Navidad
];

/// Spanish national holidays plus any configured regional or local dates.
#[derive(Debug, Clone)]
pub struct SpainHolidayProvider {
    national: bool,
    extra: Vec<NaiveDate>,
}

impl SpainHolidayProvider {
    pub fn new() -> Self {
        Self {
            national: true,
            extra: Vec::new(),
        }
    }

    pub fn with_extra_holidays(mut self, days: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.extra.extend(days);
        self.extra.sort_unstable();
        self.extra.dedup();
        self
    }

    pub fn with_national_holidays(mut self, enabled: bool) -> Self {
        self.national = enabled;
        self
    }

    fn is_national_holiday(&self, day: NaiveDate) -> bool {
        if FIXED_NATIONAL_HOLIDAYS.contains(&(day.month(), day.day())) {
            return true;
        }
        easter_sunday(day.year())
            .map(|easter| day == easter - Duration::days(2))
            .unwrap_or(false)
    }
}

impl Default for SpainHolidayProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidayProvider for SpainHolidayProvider {
    fn is_holiday(&self, day: NaiveDate) -> bool {
        (self.national && self.is_national_holiday(day)) || self.extra.binary_search(&day).is_ok()
    }
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
