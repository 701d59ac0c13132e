use serde::{Deserialize, Serialize};

/// What happened; stored as the `notification_type` Postgres enum
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::NotificationType"]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    MovieCreate,
    MovieUpdate,
    RatingCreate,
    RatingUpdate,
    ReplyCreate,
    UserCreate,
    UserUpdate,
}

/// Kind of entity a notification points at
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::NotificationEntity"]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Movie,
    Rating,
    User,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationType::MovieCreate => "movie_create",
            NotificationType::MovieUpdate => "movie_update",
            NotificationType::RatingCreate => "rating_create",
            NotificationType::RatingUpdate => "rating_update",
            NotificationType::ReplyCreate => "reply_create",
            NotificationType::UserCreate => "user_create",
            NotificationType::UserUpdate => "user_update",
        };
        write!(f, "{}", s)
    }
}
