use crate::modules::rating::domain::entities::Rating;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Every rating and reply, newest first
    async fn list(&self) -> AppResult<Vec<Rating>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rating>>;

    /// Ratings and replies of the given movies, oldest first
    async fn find_by_movies(&self, movie_ids: Vec<Uuid>) -> AppResult<Vec<Rating>>;

    /// A user's ratings and replies, newest first
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Rating>>;

    /// A second top-level rating for the same (movie, user) is rejected by the
    /// store and surfaces as `Conflict`
    async fn create(&self, rating: &Rating) -> AppResult<Rating>;

    async fn update(&self, rating: &Rating) -> AppResult<Rating>;

    /// Removes the rating; replies to it cascade
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
