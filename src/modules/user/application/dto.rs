use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::movie::domain::entities::{Movie, MovieRef};
use crate::modules::rating::domain::entities::Rating;
use crate::modules::user::domain::entities::User;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
}

/// Body of `PUT /users/{id}`. `icon` is only replaced when supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    #[serde(flatten)]
    pub user: User,
    pub bad_recommendations_count: usize,
}

/// One of the user's ratings or replies on their profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRatingEntry {
    pub id: Uuid,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub movie: MovieRef,
}

impl UserRatingEntry {
    pub fn new(rating: &Rating, movie: &Movie) -> Self {
        Self {
            id: rating.id,
            rating: rating.rating,
            review: rating.review.clone(),
            parent_id: rating.parent_id,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
            movie: MovieRef::from(movie),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub rating_count: usize,
    pub bad_recommendations_count: usize,
    pub ratings: Vec<UserRatingEntry>,
}
