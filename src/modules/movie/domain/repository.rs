use crate::modules::movie::domain::entities::{Movie, Recommendation};
use crate::modules::user::domain::entities::User;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// All movies, newest first
    async fn list(&self) -> AppResult<Vec<Movie>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>>;

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Movie>>;

    /// Inserts the movie and its recommenders in one transaction
    async fn create(&self, movie: &Movie, recommender_ids: Vec<Uuid>) -> AppResult<Movie>;

    /// Persists title, image and updated_at. When `recommender_ids` is given the
    /// recommenders set is replaced as a whole, in the same transaction.
    async fn update(&self, movie: &Movie, recommender_ids: Option<Vec<Uuid>>)
        -> AppResult<Movie>;

    /// Removes the movie; its ratings and replies cascade
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn count(&self) -> AppResult<i64>;

    /// Recommenders of one movie, in user creation order
    async fn recommenders(&self, movie_id: Uuid) -> AppResult<Vec<User>>;

    /// Every (movie, recommender) pair
    async fn recommendations(&self) -> AppResult<Vec<Recommendation>>;

    /// Movies a user recommends
    async fn recommended_movie_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>>;
}
