use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::application::service::NotificationService;
use super::domain::entities::Notification;
use crate::commands::extract::AppQuery;
use crate::shared::errors::AppResult;

/// `limit` stays a string so a non-numeric value falls back to the default
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    pub limit: Option<String>,
}

pub async fn list_notifications(
    State(notification_service): State<Arc<NotificationService>>,
    AppQuery(query): AppQuery<NotificationQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = notification_service.recent(query.limit.as_deref()).await?;
    Ok(Json(notifications))
}
