use serde_json::json;
use uuid::Uuid;

use super::entities::Notification;
use super::value_objects::{EntityType, NotificationType};

/// Domain events that leave a trace in the activity feed.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityEvent {
    MovieCreated {
        movie_id: Uuid,
        title: String,
    },
    MovieUpdated {
        movie_id: Uuid,
        title: String,
    },
    RatingCreated {
        rating_id: Uuid,
        movie_id: Uuid,
        movie_title: String,
        user_name: String,
        score: i32,
    },
    ReplyCreated {
        rating_id: Uuid,
        parent_id: Uuid,
        movie_id: Uuid,
        movie_title: String,
        user_name: String,
        parent_author: String,
    },
    RatingUpdated {
        rating_id: Uuid,
        movie_id: Uuid,
        movie_title: String,
        user_name: String,
        score: Option<i32>,
    },
    UserCreated {
        user_id: Uuid,
        name: String,
    },
    UserUpdated {
        user_id: Uuid,
        name: String,
    },
}

impl ActivityEvent {
    pub fn notification_type(&self) -> NotificationType {
        match self {
            ActivityEvent::MovieCreated { .. } => NotificationType::MovieCreate,
            ActivityEvent::MovieUpdated { .. } => NotificationType::MovieUpdate,
            ActivityEvent::RatingCreated { .. } => NotificationType::RatingCreate,
            ActivityEvent::ReplyCreated { .. } => NotificationType::ReplyCreate,
            ActivityEvent::RatingUpdated { .. } => NotificationType::RatingUpdate,
            ActivityEvent::UserCreated { .. } => NotificationType::UserCreate,
            ActivityEvent::UserUpdated { .. } => NotificationType::UserUpdate,
        }
    }

    /// Renders the feed entry for this event.
    pub fn to_notification(&self) -> Notification {
        let (message, entity, metadata) = match self {
            ActivityEvent::MovieCreated { movie_id, title } => (
                format!("New movie \"{}\" was added", title),
                (EntityType::Movie, *movie_id),
                json!({ "title": title }),
            ),
            ActivityEvent::MovieUpdated { movie_id, title } => (
                format!("Movie \"{}\" was updated", title),
                (EntityType::Movie, *movie_id),
                json!({ "title": title }),
            ),
            ActivityEvent::RatingCreated {
                rating_id,
                movie_id,
                movie_title,
                user_name,
                score,
            } => (
                format!("{} rated \"{}\" {}/5", user_name, movie_title, score),
                (EntityType::Rating, *rating_id),
                json!({
                    "movieId": movie_id,
                    "movieTitle": movie_title,
                    "userName": user_name,
                    "rating": score,
                }),
            ),
            ActivityEvent::ReplyCreated {
                rating_id,
                parent_id,
                movie_id,
                movie_title,
                user_name,
                parent_author,
            } => (
                format!(
                    "{} replied to {}'s review of \"{}\"",
                    user_name, parent_author, movie_title
                ),
                (EntityType::Rating, *rating_id),
                json!({
                    "movieId": movie_id,
                    "movieTitle": movie_title,
                    "parentId": parent_id,
                    "userName": user_name,
                }),
            ),
            ActivityEvent::RatingUpdated {
                rating_id,
                movie_id,
                movie_title,
                user_name,
                score,
            } => (
                match score {
                    Some(score) => format!(
                        "{} updated their rating of \"{}\" to {}/5",
                        user_name, movie_title, score
                    ),
                    None => format!("{} updated their reply on \"{}\"", user_name, movie_title),
                },
                (EntityType::Rating, *rating_id),
                json!({
                    "movieId": movie_id,
                    "movieTitle": movie_title,
                    "userName": user_name,
                    "rating": score,
                }),
            ),
            ActivityEvent::UserCreated { user_id, name } => (
                format!("{} joined", name),
                (EntityType::User, *user_id),
                json!({ "name": name }),
            ),
            ActivityEvent::UserUpdated { user_id, name } => (
                format!("{} updated their profile", name),
                (EntityType::User, *user_id),
                json!({ "name": name }),
            ),
        };

        Notification::new(
            self.notification_type(),
            message,
            Some(entity),
            Some(metadata),
        )
    }
}
