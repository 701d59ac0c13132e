use crate::modules::notification::domain::{
    entities::Notification,
    value_objects::{EntityType, NotificationType},
};
use crate::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationModel {
    pub id: Uuid,
    pub notification_type: NotificationType,
    pub message: String,
    pub entity_id: Option<Uuid>,
    pub entity_type: Option<EntityType>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: model.id,
            notification_type: model.notification_type,
            message: model.message,
            entity_id: model.entity_id,
            entity_type: model.entity_type,
            metadata: model.metadata,
            created_at: model.created_at,
        }
    }
}

impl From<&Notification> for NotificationModel {
    fn from(notification: &Notification) -> Self {
        NotificationModel {
            id: notification.id,
            notification_type: notification.notification_type,
            message: notification.message.clone(),
            entity_id: notification.entity_id,
            entity_type: notification.entity_type,
            metadata: notification.metadata.clone(),
            created_at: notification.created_at,
        }
    }
}
