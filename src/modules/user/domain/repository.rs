use crate::modules::user::domain::entities::User;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, oldest first
    async fn list(&self) -> AppResult<Vec<User>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Users matching any of the ids; unknown ids are skipped
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;

    async fn create(&self, user: &User) -> AppResult<User>;

    /// Persists name, icon and updated_at; `NotFound` if the row is gone
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Removes the user together with their ratings, replies and recommendations
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
