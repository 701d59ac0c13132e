use crate::modules::movie::domain::entities::{Movie, Recommendation};
use crate::schema::{movie_recommenders, movies};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = movies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MovieModel {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = movies)]
pub struct NewMovie<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub image: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// A cleared image must be written as NULL, not skipped
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = movies)]
#[diesel(treat_none_as_null = true)]
pub struct MovieChangeset<'a> {
    pub title: &'a str,
    pub image: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, Copy)]
#[diesel(table_name = movie_recommenders)]
pub struct RecommenderModel {
    pub movie_id: Uuid,
    pub user_id: Uuid,
}

impl From<MovieModel> for Movie {
    fn from(model: MovieModel) -> Self {
        Movie {
            id: model.id,
            title: model.title,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl<'a> From<&'a Movie> for NewMovie<'a> {
    fn from(movie: &'a Movie) -> Self {
        NewMovie {
            id: movie.id,
            title: &movie.title,
            image: movie.image.as_deref(),
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}

impl<'a> From<&'a Movie> for MovieChangeset<'a> {
    fn from(movie: &'a Movie) -> Self {
        MovieChangeset {
            title: &movie.title,
            image: movie.image.as_deref(),
            updated_at: movie.updated_at,
        }
    }
}

impl From<RecommenderModel> for Recommendation {
    fn from(model: RecommenderModel) -> Self {
        Recommendation {
            movie_id: model.movie_id,
            user_id: model.user_id,
        }
    }
}

pub fn recommender_rows(movie_id: Uuid, user_ids: &[Uuid]) -> Vec<RecommenderModel> {
    user_ids
        .iter()
        .map(|&user_id| RecommenderModel { movie_id, user_id })
        .collect()
}
