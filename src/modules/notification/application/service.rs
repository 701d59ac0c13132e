use std::sync::Arc;

use crate::modules::notification::domain::{
    entities::Notification, events::ActivityEvent, repository::NotificationRepository,
};
use crate::shared::config::NotificationConfig;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;
use crate::log_debug;

/// Records activity-feed entries and serves the feed.
pub struct NotificationService {
    repo: Arc<dyn NotificationRepository>,
    config: NotificationConfig,
}

impl NotificationService {
    pub fn new(repo: Arc<dyn NotificationRepository>, config: NotificationConfig) -> Self {
        Self { repo, config }
    }

    /// Best effort: runs after the primary write has committed. A failure is
    /// logged and swallowed, never retried and never surfaced to the caller.
    pub async fn record(&self, event: ActivityEvent) {
        let notification = event.to_notification();

        match self.repo.append(&notification).await {
            Ok(()) => log_debug!(
                "Recorded {} notification {}",
                notification.notification_type,
                notification.id
            ),
            Err(e) => LogContext::side_effect_failed(
                &format!("Recording {} notification", notification.notification_type),
                &e,
            ),
        }
    }

    /// Newest entries first. See [`NotificationService::resolve_limit`].
    pub async fn recent(&self, limit: Option<&str>) -> AppResult<Vec<Notification>> {
        let limit = self.resolve_limit(limit);
        self.repo.recent(limit).await
    }

    /// Missing or non-numeric limits fall back to the default; everything else
    /// is clamped to `1..=max_limit`.
    pub fn resolve_limit(&self, raw: Option<&str>) -> i64 {
        raw.and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(self.config.default_limit)
            .clamp(1, self.config.max_limit)
    }
}
