use crate::modules::notification::domain::entities::Notification;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Append-only store for the activity feed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn append(&self, notification: &Notification) -> AppResult<()>;

    /// Most recent entries first
    async fn recent(&self, limit: i64) -> AppResult<Vec<Notification>>;
}
