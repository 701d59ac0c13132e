use crate::modules::rating::domain::entities::Rating;
use crate::schema::ratings;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RatingModel {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub user_id: Uuid,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = ratings)]
pub struct NewRating<'a> {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub user_id: Uuid,
    pub rating: Option<i32>,
    pub review: Option<&'a str>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Score and review are replaced as a pair; None clears the column
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = ratings)]
#[diesel(treat_none_as_null = true)]
pub struct RatingChangeset<'a> {
    pub rating: Option<i32>,
    pub review: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl From<RatingModel> for Rating {
    fn from(model: RatingModel) -> Self {
        Rating {
            id: model.id,
            movie_id: model.movie_id,
            user_id: model.user_id,
            rating: model.rating,
            review: model.review,
            parent_id: model.parent_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl<'a> From<&'a Rating> for NewRating<'a> {
    fn from(rating: &'a Rating) -> Self {
        NewRating {
            id: rating.id,
            movie_id: rating.movie_id,
            user_id: rating.user_id,
            rating: rating.rating,
            review: rating.review.as_deref(),
            parent_id: rating.parent_id,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

impl<'a> From<&'a Rating> for RatingChangeset<'a> {
    fn from(rating: &'a Rating) -> Self {
        RatingChangeset {
            rating: rating.rating,
            review: rating.review.as_deref(),
            updated_at: rating.updated_at,
        }
    }
}
