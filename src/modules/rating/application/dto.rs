use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::movie::domain::entities::{Movie, MovieSummary};
use crate::modules::rating::domain::entities::Rating;
use crate::modules::user::domain::entities::{User, UserSummary};

/// Body of `POST /ratings`. A `parentId` makes it a reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    pub movie_id: Option<String>,
    pub user_id: Option<String>,
    pub parent_id: Option<String>,
    pub rating: Option<i32>,
    pub review: Option<String>,
}

/// Body of `PUT /ratings/{id}`; both fields are replaced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingRequest {
    pub rating: Option<i32>,
    pub review: Option<String>,
}

/// A rating as shown under its movie, with its replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    pub id: Uuid,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserSummary,
    pub replies: Vec<RatingView>,
}

impl RatingView {
    fn from_parts(rating: &Rating, author: &User, replies: Vec<RatingView>) -> Self {
        Self {
            id: rating.id,
            rating: rating.rating,
            review: rating.review.clone(),
            parent_id: rating.parent_id,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
            user: UserSummary::from(author),
            replies,
        }
    }

    /// Threads one movie's rows: top-level ratings newest first, each with its
    /// replies oldest first. Rows whose author is not in `users` are skipped.
    pub fn thread(ratings: &[Rating], users: &HashMap<Uuid, User>) -> Vec<RatingView> {
        let mut replies_by_parent: HashMap<Uuid, Vec<&Rating>> = HashMap::new();
        for reply in ratings.iter().filter(|r| r.is_reply()) {
            if let Some(parent_id) = reply.parent_id {
                replies_by_parent.entry(parent_id).or_default().push(reply);
            }
        }

        let mut top_level: Vec<&Rating> = ratings.iter().filter(|r| r.is_top_level()).collect();
        top_level.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        top_level
            .into_iter()
            .filter_map(|rating| {
                let author = users.get(&rating.user_id)?;

                let mut replies = replies_by_parent.remove(&rating.id).unwrap_or_default();
                replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
                let replies = replies
                    .into_iter()
                    .filter_map(|reply| {
                        users
                            .get(&reply.user_id)
                            .map(|u| RatingView::from_parts(reply, u, Vec::new()))
                    })
                    .collect();

                Some(RatingView::from_parts(rating, author, replies))
            })
            .collect()
    }
}

/// A rating with its movie and author, as returned by the `/ratings` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDetail {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub user_id: Uuid,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub movie: MovieSummary,
    pub user: UserSummary,
}

impl RatingDetail {
    pub fn new(rating: &Rating, movie: &Movie, user: &User) -> Self {
        Self {
            id: rating.id,
            movie_id: rating.movie_id,
            user_id: rating.user_id,
            rating: rating.rating,
            review: rating.review.clone(),
            parent_id: rating.parent_id,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
            movie: MovieSummary::from(movie),
            user: UserSummary::from(user),
        }
    }
}

/// Index entities by id for view assembly.
pub fn index_by_id<T, F>(items: Vec<T>, id: F) -> HashMap<Uuid, T>
where
    F: Fn(&T) -> Uuid,
{
    items.into_iter().map(|item| (id(&item), item)).collect()
}
