use crate::domain::model::{PeriodReason, PeriodReport, TariffPeriod};
use crate::domain::ports::HolidayProvider;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

pub struct PeriodCalculator<H: HolidayProvider> {
    holidays: H,
}

impl<H: HolidayProvider> PeriodCalculator<H> {
    pub fn new(holidays: H) -> Self {
        Self { holidays }
    }

    pub fn calculate(&self, now: NaiveDateTime) -> PeriodReport {
        let (period, reason) = if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            (TariffPeriod::Valle, PeriodReason::Weekend)
        } else if self.holidays.is_holiday(now.date()) {
            (TariffPeriod::Valle, PeriodReason::Holiday)
        } else {
            (period_for_hour(now.hour()), PeriodReason::Schedule)
        };

        tracing::debug!("{} -> {:?} ({:?})", now, period, reason);

        PeriodReport {
            at: now,
            period,
            reason,
        }
    }
}

/// Weekday schedule. `hour` comes from chrono and is always below 24.
pub fn period_for_hour(hour: u32) -> TariffPeriod {
    match hour {
        0..=7 => TariffPeriod::Valle,
        8..=9 | 14..=17 | 22..=23 => TariffPeriod::Llano,
        _ => TariffPeriod::Punta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct NoHolidays;

    impl HolidayProvider for NoHolidays {
        fn is_holiday(&self, _day: NaiveDate) -> bool {
            false
        }
    }

    struct EveryDay;

    impl HolidayProvider for EveryDay {
        fn is_holiday(&self, _day: NaiveDate) -> bool {
            true
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_weekday_schedule() {
        let calc = PeriodCalculator::new(NoHolidays);
        // 2026-03-02 is a Monday
        let expected = [
            (0, TariffPeriod::Valle),
            (7, TariffPeriod::Valle),
            (8, TariffPeriod::Llano),
            (9, TariffPeriod::Llano),
            (10, TariffPeriod::Punta),
            (13, TariffPeriod::Punta),
            (14, TariffPeriod::Llano),
            (17, TariffPeriod::Llano),
            (18, TariffPeriod::Punta),
            (21, TariffPeriod::Punta),
            (22, TariffPeriod::Llano),
            (23, TariffPeriod::Llano),
        ];
        for (hour, period) in expected {
            let report = calc.calculate(at(2026, 3, 2, hour));
            assert_eq!(report.period, period, "hour {}", hour);
            assert_eq!(report.reason, PeriodReason::Schedule);
        }
    }

    #[test]
    fn test_weekend_is_always_valle() {
        let calc = PeriodCalculator::new(NoHolidays);
        for hour in 0..24 {
            assert_eq!(calc.calculate(at(2026, 3, 7, hour)).period, TariffPeriod::Valle);
            let sunday = calc.calculate(at(2026, 3, 8, hour));
            assert_eq!(sunday.period, TariffPeriod::Valle);
            assert_eq!(sunday.reason, PeriodReason::Weekend);
        }
    }

    #[test]
    fn test_holiday_is_valle_at_peak_hours() {
        let calc = PeriodCalculator::new(EveryDay);
        let report = calc.calculate(at(2026, 3, 4, 11));
        assert_eq!(report.period, TariffPeriod::Valle);
        assert_eq!(report.reason, PeriodReason::Holiday);
    }

    #[test]
    fn test_period_for_hour_covers_the_day() {
        let punta = (0..24)
            .filter(|h| period_for_hour(*h) == TariffPeriod::Punta)
            .count();
        let llano = (0..24)
            .filter(|h| period_for_hour(*h) == TariffPeriod::Llano)
            .count();
        assert_eq!(punta, 8);
        assert_eq!(llano, 8);
    }
}
