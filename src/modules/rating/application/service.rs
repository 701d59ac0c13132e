use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use super::dto::{index_by_id, CreateRatingRequest, RatingDetail, UpdateRatingRequest};
use crate::modules::movie::domain::{entities::Movie, repository::MovieRepository};
use crate::modules::notification::application::NotificationService;
use crate::modules::notification::domain::events::ActivityEvent;
use crate::modules::rating::domain::{entities::Rating, repository::RatingRepository};
use crate::modules::user::domain::{entities::User, repository::UserRepository};
use crate::shared::errors::{AppError, AppResult, ConflictContext};
use crate::shared::utils::logger::LogContext;
use crate::shared::utils::Validator;

/// What a create request resolves to once validated.
enum NewRating {
    Reply(Uuid),
    TopLevel(i32),
}

pub struct RatingService {
    rating_repo: Arc<dyn RatingRepository>,
    movie_repo: Arc<dyn MovieRepository>,
    user_repo: Arc<dyn UserRepository>,
    notifications: Arc<NotificationService>,
}

impl RatingService {
    pub fn new(
        rating_repo: Arc<dyn RatingRepository>,
        movie_repo: Arc<dyn MovieRepository>,
        user_repo: Arc<dyn UserRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            rating_repo,
            movie_repo,
            user_repo,
            notifications,
        }
    }

    /// Every rating and reply, newest first, with movie and author.
    pub async fn list_ratings(&self) -> AppResult<Vec<RatingDetail>> {
        let ratings = self.rating_repo.list().await?;

        let movie_ids: BTreeSet<Uuid> = ratings.iter().map(|r| r.movie_id).collect();
        let user_ids: BTreeSet<Uuid> = ratings.iter().map(|r| r.user_id).collect();
        let movies = index_by_id(
            self.movie_repo.find_by_ids(movie_ids.into_iter().collect()).await?,
            |m| m.id,
        );
        let users = index_by_id(
            self.user_repo.find_by_ids(user_ids.into_iter().collect()).await?,
            |u| u.id,
        );

        Ok(ratings
            .iter()
            .filter_map(|r| {
                let movie = movies.get(&r.movie_id)?;
                let user = users.get(&r.user_id)?;
                Some(RatingDetail::new(r, movie, user))
            })
            .collect())
    }

    /// Creates a top-level rating, or a reply when `parentId` is set.
    ///
    /// The one-rating-per-(movie, user) rule is enforced by the store's
    /// partial unique index; its violation is reported as a conflict.
    pub async fn create_rating(&self, request: CreateRatingRequest) -> AppResult<RatingDetail> {
        let movie_id = Validator::require_id("movieId", request.movie_id.as_deref())?;
        let user_id = Validator::require_id("userId", request.user_id.as_deref())?;
        let parent_id = match request.parent_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Validator::parse_id("parentId", raw)?),
        };
        let review = Validator::normalize_text(request.review.as_deref());

        // Range applies to replies too; only top-level ratings require a score
        let score = Validator::validate_optional_rating(request.rating)?;
        let target = match (parent_id, score) {
            (Some(parent_id), _) => NewRating::Reply(parent_id),
            (None, Some(score)) => NewRating::TopLevel(score),
            (None, None) => {
                return Err(AppError::ValidationError("Rating is required".to_string()))
            }
        };

        let movie = self.existing_movie(movie_id).await?;
        let user = self.existing_user(user_id).await?;

        let (saved, event) = match target {
            NewRating::Reply(parent_id) => {
                let parent = self.reply_target(parent_id, movie_id).await?;
                let parent_author = self
                    .user_repo
                    .find_by_id(parent.user_id)
                    .await?
                    .map(|u| u.name)
                    .unwrap_or_default();

                let saved = self
                    .rating_repo
                    .create(&Rating::reply(&parent, user.id, score, review))
                    .await?;
                let event = ActivityEvent::ReplyCreated {
                    rating_id: saved.id,
                    parent_id: parent.id,
                    movie_id: movie.id,
                    movie_title: movie.title.clone(),
                    user_name: user.name.clone(),
                    parent_author,
                };
                (saved, event)
            }
            NewRating::TopLevel(score) => {
                let saved = self
                    .rating_repo
                    .create(&Rating::top_level(movie.id, user.id, score, review))
                    .await
                    .on_conflict("You have already rated this movie")?;
                let event = ActivityEvent::RatingCreated {
                    rating_id: saved.id,
                    movie_id: movie.id,
                    movie_title: movie.title.clone(),
                    user_name: user.name.clone(),
                    score,
                };
                (saved, event)
            }
        };

        let kind = if saved.is_reply() { "reply" } else { "rating" };
        LogContext::entity_written("Created", kind, &saved.id);
        self.notifications.record(event).await;

        Ok(RatingDetail::new(&saved, &movie, &user))
    }

    /// Replaces score and review. Top-level ratings must keep a score;
    /// replies may drop theirs.
    pub async fn update_rating(
        &self,
        id: Uuid,
        request: UpdateRatingRequest,
    ) -> AppResult<RatingDetail> {
        let score = Validator::validate_optional_rating(request.rating)?;

        let mut rating = self
            .rating_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rating not found".to_string()))?;

        if rating.is_top_level() && score.is_none() {
            return Err(AppError::ValidationError(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        rating.revise(score, Validator::normalize_text(request.review.as_deref()));
        let saved = self.rating_repo.update(&rating).await?;

        let movie = self
            .movie_repo
            .find_by_id(saved.movie_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;
        let user = self
            .user_repo
            .find_by_id(saved.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        LogContext::entity_written("Updated", "rating", &saved.id);
        self.notifications
            .record(ActivityEvent::RatingUpdated {
                rating_id: saved.id,
                movie_id: movie.id,
                movie_title: movie.title.clone(),
                user_name: user.name.clone(),
                score: saved.rating,
            })
            .await;

        Ok(RatingDetail::new(&saved, &movie, &user))
    }

    pub async fn delete_rating(&self, id: Uuid) -> AppResult<()> {
        self.rating_repo.delete(id).await?;
        LogContext::entity_written("Deleted", "rating", &id);
        Ok(())
    }

    async fn existing_movie(&self, id: Uuid) -> AppResult<Movie> {
        self.movie_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ValidationError("Movie does not exist".to_string()))
    }

    async fn existing_user(&self, id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ValidationError("User does not exist".to_string()))
    }

    /// Replies thread one level deep, under a rating of the same movie.
    async fn reply_target(&self, parent_id: Uuid, movie_id: Uuid) -> AppResult<Rating> {
        let parent = self
            .rating_repo
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| AppError::ValidationError("Parent rating does not exist".to_string()))?;

        if !parent.is_top_level() {
            return Err(AppError::ValidationError(
                "Replies can only be made to top-level ratings".to_string(),
            ));
        }
        if parent.movie_id != movie_id {
            return Err(AppError::ValidationError(
                "Parent rating belongs to a different movie".to_string(),
            ));
        }
        Ok(parent)
    }
}
