use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait HolidayProvider: Send + Sync {
    fn is_holiday(&self, day: NaiveDate) -> bool;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> Result<()>;
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Box<T> {
    async fn send(&self, message: &str) -> Result<()> {
        (**self).send(message).await
    }
}

/// Persists the last message that was handled, so unchanged messages are not re-sent.
pub trait StateRepository: Send + Sync {
    fn last_output(&self) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn save_output(&self, message: &str)
        -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn notifications_enabled(&self) -> bool;
    fn bot_token(&self) -> Option<&str>;
    fn chat_id(&self) -> Option<&str>;
    fn api_base(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn state_path(&self) -> &str;
    fn national_holidays(&self) -> bool;
    fn extra_holidays(&self) -> &[NaiveDate];
}
