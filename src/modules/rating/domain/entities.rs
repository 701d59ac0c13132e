use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scored review (top-level) or a reply to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub user_id: Uuid,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    pub fn top_level(movie_id: Uuid, user_id: Uuid, score: i32, review: Option<String>) -> Self {
        Self::build(movie_id, user_id, Some(score), review, None)
    }

    pub fn reply(
        parent: &Rating,
        user_id: Uuid,
        score: Option<i32>,
        review: Option<String>,
    ) -> Self {
        Self::build(parent.movie_id, user_id, score, review, Some(parent.id))
    }

    fn build(
        movie_id: Uuid,
        user_id: Uuid,
        rating: Option<i32>,
        review: Option<String>,
        parent_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            movie_id,
            user_id,
            rating,
            review,
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Replaces score and review wholesale.
    pub fn revise(&mut self, rating: Option<i32>, review: Option<String>) {
        self.rating = rating;
        self.review = review;
        self.updated_at = Utc::now();
    }
}
