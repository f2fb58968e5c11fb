use crate::domain::message::MessageFormatter;
use crate::domain::model::RunOutcome;
use crate::domain::ports::{HolidayProvider, Notifier, StateRepository};
use crate::domain::tariff::PeriodCalculator;
use crate::utils::error::Result;
use chrono::NaiveDateTime;

pub struct NotificationService<H: HolidayProvider, N: Notifier, S: StateRepository> {
    calculator: PeriodCalculator<H>,
    notifier: N,
    state: S,
    persist: bool,
}

impl<H: HolidayProvider, N: Notifier, S: StateRepository> NotificationService<H, N, S> {
    pub fn new(calculator: PeriodCalculator<H>, notifier: N, state: S) -> Self {
        Self {
            calculator,
            notifier,
            state,
            persist: true,
        }
    }

    /// A dry run reads the last output but never writes it, so it cannot
    /// suppress the next delivered notification.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.persist = !dry_run;
        self
    }

    pub async fn run(&self, now: NaiveDateTime) -> Result<RunOutcome> {
        let report = self.calculator.calculate(now);
        let message = MessageFormatter::format(&report);

        println!("{}", message);

        let last_output = self.state.last_output().await?;
        if last_output.as_deref() == Some(message.as_str()) {
            tracing::info!("Message unchanged. Telegram not sent.");
            return Ok(RunOutcome {
                report,
                message,
                notified: false,
                changed: false,
            });
        }

        let notified = if message.is_empty() {
            false
        } else {
            match self.notifier.send(&message).await {
                Ok(()) => true,
                Err(e) => {
                    // a failed send is still recorded; the next period change notifies again
                    tracing::error!("Telegram error: {}", e);
                    tracing::error!("💡 {}", e.recovery_suggestion());
                    false
                }
            }
        };

        if !self.persist {
            tracing::info!("Dry run. Last output left untouched.");
            return Ok(RunOutcome {
                report,
                message,
                notified: false,
                changed: true,
            });
        }

        self.state.save_output(&message).await?;

        Ok(RunOutcome {
            report,
            message,
            notified,
            changed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::SpainHolidayProvider;
    use crate::domain::model::TariffPeriod;
    use crate::utils::error::PrecioLuzError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockState {
        value: Arc<Mutex<Option<String>>>,
    }

    impl StateRepository for MockState {
        async fn last_output(&self) -> Result<Option<String>> {
            Ok(self.value.lock().await.clone())
        }

        async fn save_output(&self, message: &str) -> Result<()> {
            *self.value.lock().await = Some(message.to_string());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, message: &str) -> Result<()> {
            self.sent.lock().await.push(message.to_string());
            if self.fail {
                return Err(PrecioLuzError::TelegramError {
                    status: 500,
                    description: "Internal Server Error".to_string(),
                });
            }
            Ok(())
        }
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn service(
        notifier: RecordingNotifier,
        state: MockState,
    ) -> NotificationService<SpainHolidayProvider, RecordingNotifier, MockState> {
        NotificationService::new(
            PeriodCalculator::new(SpainHolidayProvider::new()),
            notifier,
            state,
        )
    }

    #[tokio::test]
    async fn test_sends_only_when_message_changes() {
        let notifier = RecordingNotifier::default();
        let state = MockState::default();
        let service = service(notifier.clone(), state.clone());

        // Monday 2026-03-02
        let first = service.run(at(2, 8)).await.unwrap();
        assert!(first.notified);
        assert_eq!(first.report.period, TariffPeriod::Llano);

        let second = service.run(at(2, 9)).await.unwrap();
        assert!(!second.notified);
        assert!(!second.changed);

        let third = service.run(at(2, 10)).await.unwrap();
        assert!(third.notified);
        assert_eq!(third.report.period, TariffPeriod::Punta);

        let sent = notifier.sent.lock().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1], "Estás en Hora Punta (la más cara).");
        assert_eq!(
            state.value.lock().await.as_deref(),
            Some("Estás en Hora Punta (la más cara).")
        );
    }

    #[tokio::test]
    async fn test_dry_run_does_not_touch_state() {
        let notifier = RecordingNotifier::default();
        let state = MockState::default();
        let dry = service(notifier.clone(), state.clone()).dry_run(true);

        let outcome = dry.run(at(4, 11)).await.unwrap();
        assert!(outcome.changed);
        assert!(!outcome.notified);
        assert_eq!(*state.value.lock().await, None);

        let real = service(notifier.clone(), state.clone());
        let outcome = real.run(at(4, 11)).await.unwrap();
        assert!(outcome.notified);
        assert_eq!(notifier.sent.lock().await.len(), 2);
        assert_eq!(
            state.value.lock().await.as_deref(),
            Some("Estás en Hora Punta (la más cara).")
        );
    }

    #[tokio::test]
    async fn test_failed_send_is_persisted_and_not_fatal() {
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        let state = MockState::default();
        let service = service(notifier.clone(), state.clone());

        let outcome = service.run(at(2, 11)).await.unwrap();
        assert!(!outcome.notified);
        assert!(outcome.changed);
        assert_eq!(
            state.value.lock().await.as_deref(),
            Some("Estás en Hora Punta (la más cara).")
        );

        let again = service.run(at(2, 12)).await.unwrap();
        assert!(!again.changed);
        assert_eq!(notifier.sent.lock().await.len(), 1);
    }
}
