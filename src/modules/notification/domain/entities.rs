use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{EntityType, NotificationType};

/// Immutable activity-feed entry. The message is rendered once, at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub message: String,
    pub entity_id: Option<Uuid>,
    pub entity_type: Option<EntityType>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        notification_type: NotificationType,
        message: String,
        entity: Option<(EntityType, Uuid)>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            notification_type,
            message,
            entity_id: entity.map(|(_, id)| id),
            entity_type: entity.map(|(kind, _)| kind),
            metadata,
            created_at: Utc::now(),
        }
    }
}
