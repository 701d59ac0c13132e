use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::movie::domain::entities::Movie;
use crate::modules::rating::application::dto::RatingView;
use crate::modules::rating::domain::entities::Rating;
use crate::modules::rating::domain::services::aggregate;
use crate::modules::user::domain::entities::{User, UserSummary};
use crate::shared::utils::serde_helpers::double_option;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    pub image: Option<String>,
    pub recommender_ids: Option<Vec<String>>,
}

/// Body of `PUT /movies/{id}`. An absent `image` keeps the current one,
/// `null` clears it; an absent `recommenderIds` keeps the current set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
    pub recommender_ids: Option<Vec<String>>,
}

/// A movie with its statistics, computed from current rows on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieListItem {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub average_rating: f64,
    pub rating_count: i64,
    pub ratings: Vec<RatingView>,
}

impl MovieListItem {
    /// `ratings` are this movie's rows, replies included.
    pub fn new(movie: &Movie, ratings: &[Rating], users: &HashMap<Uuid, User>) -> Self {
        let stats = aggregate(ratings);
        Self {
            id: movie.id,
            title: movie.title.clone(),
            image: movie.image.clone(),
            created_at: movie.created_at,
            updated_at: movie.updated_at,
            average_rating: stats.average_rating,
            rating_count: stats.rating_count,
            ratings: RatingView::thread(ratings, users),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: MovieListItem,
    pub recommenders: Vec<UserSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_missing_and_null_image() {
        let keep: UpdateMovieRequest = serde_json::from_str(r#"{"title": "F1"}"#).unwrap();
        let clear: UpdateMovieRequest =
            serde_json::from_str(r#"{"title": "F1", "image": null}"#).unwrap();

        assert_eq!(keep.image, None);
        assert_eq!(clear.image, Some(None));
        assert!(keep.recommender_ids.is_none());
    }

    #[test]
    fn detail_serializes_flat_camel_case() {
        let ana = User::new("Ana".into(), "🎬".into());
        let movie = Movie::new("F1".into(), None);
        let rating = Rating::top_level(movie.id, ana.id, 4, None);
        let users = HashMap::from([(ana.id, ana.clone())]);

        let detail = MovieDetail {
            movie: MovieListItem::new(&movie, &[rating], &users),
            recommenders: vec![UserSummary::from(&ana)],
        };
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["title"], "F1");
        assert_eq!(json["averageRating"], 4.0);
        assert_eq!(json["ratingCount"], 1);
        assert_eq!(json["ratings"][0]["user"]["name"], "Ana");
        assert_eq!(json["recommenders"][0]["icon"], "🎬");
        assert!(json["image"].is_null());
    }
}
