use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDetail, UserListItem, UserRatingEntry};
use crate::modules::movie::domain::{entities::Recommendation, repository::MovieRepository};
use crate::modules::notification::application::NotificationService;
use crate::modules::notification::domain::events::ActivityEvent;
use crate::modules::rating::application::dto::index_by_id;
use crate::modules::rating::domain::repository::RatingRepository;
use crate::modules::rating::domain::services::{bad_recommendation_counts, rank};
use crate::modules::user::domain::{entities::User, repository::UserRepository};
use crate::shared::errors::{AppError, AppResult, ConflictContext};
use crate::shared::utils::logger::LogContext;
use crate::shared::utils::Validator;

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    movie_repo: Arc<dyn MovieRepository>,
    rating_repo: Arc<dyn RatingRepository>,
    notifications: Arc<NotificationService>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        movie_repo: Arc<dyn MovieRepository>,
        rating_repo: Arc<dyn RatingRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            user_repo,
            movie_repo,
            rating_repo,
            notifications,
        }
    }

    /// All users, oldest first, each with their bad-recommendation count.
    pub async fn list_users(&self) -> AppResult<Vec<UserListItem>> {
        let users = self.user_repo.list().await?;
        let recommendations = self.movie_repo.recommendations().await?;
        let counts = self.bad_counts(&recommendations).await?;

        Ok(users
            .into_iter()
            .map(|user| UserListItem {
                bad_recommendations_count: counts.get(&user.id).copied().unwrap_or(0),
                user,
            })
            .collect())
    }

    /// Users with at least one bad recommendation, worst first. Ties keep
    /// creation order.
    pub async fn leaderboard(&self) -> AppResult<Vec<UserListItem>> {
        let users = self.list_users().await?;
        Ok(rank(users, |item| item.bad_recommendations_count))
    }

    pub async fn get_user(&self, id: Uuid) -> AppResult<UserDetail> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let authored = self.rating_repo.find_by_user(id).await?;
        let movie_ids: BTreeSet<Uuid> = authored.iter().map(|r| r.movie_id).collect();
        let movies = index_by_id(
            self.movie_repo
                .find_by_ids(movie_ids.into_iter().collect())
                .await?,
            |m| m.id,
        );

        let recommendations: Vec<Recommendation> = self
            .movie_repo
            .recommended_movie_ids(id)
            .await?
            .into_iter()
            .map(|movie_id| Recommendation {
                movie_id,
                user_id: id,
            })
            .collect();
        let bad = self.bad_counts(&recommendations).await?;

        Ok(UserDetail {
            rating_count: authored.iter().filter(|r| r.is_top_level()).count(),
            bad_recommendations_count: bad.get(&id).copied().unwrap_or(0),
            ratings: authored
                .iter()
                .filter_map(|r| movies.get(&r.movie_id).map(|m| UserRatingEntry::new(r, m)))
                .collect(),
            user,
        })
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<User> {
        let name = Validator::validate_user_name(request.name.as_deref())?;
        let icon = Validator::validate_icon(request.icon.as_deref())?;

        let user = User::new(name, icon);
        let saved = self
            .user_repo
            .create(&user)
            .await
            .on_conflict("User already exists")?;

        LogContext::entity_written("Created", "user", &saved.id);
        self.notifications
            .record(ActivityEvent::UserCreated {
                user_id: saved.id,
                name: saved.name.clone(),
            })
            .await;

        Ok(saved)
    }

    pub async fn update_user(&self, id: Uuid, request: UpdateUserRequest) -> AppResult<User> {
        let name = Validator::validate_user_name(request.name.as_deref())?;
        let icon = match request.icon.as_deref() {
            Some(icon) => Some(Validator::validate_icon(Some(icon))?),
            None => None,
        };

        let mut user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        user.rename(name);
        if let Some(icon) = icon {
            user.change_icon(icon);
        }

        let saved = self
            .user_repo
            .update(&user)
            .await
            .on_conflict("User name already exists")?;

        LogContext::entity_written("Updated", "user", &saved.id);
        self.notifications
            .record(ActivityEvent::UserUpdated {
                user_id: saved.id,
                name: saved.name.clone(),
            })
            .await;

        Ok(saved)
    }

    /// Cascades to the user's ratings and recommendations in the store.
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.user_repo.delete(id).await?;
        LogContext::entity_written("Deleted", "user", &id);
        Ok(())
    }

    async fn bad_counts(
        &self,
        recommendations: &[Recommendation],
    ) -> AppResult<HashMap<Uuid, usize>> {
        if recommendations.is_empty() {
            return Ok(Default::default());
        }

        let movie_ids: BTreeSet<Uuid> = recommendations.iter().map(|r| r.movie_id).collect();
        let ratings = self
            .rating_repo
            .find_by_movies(movie_ids.into_iter().collect())
            .await?;
        Ok(bad_recommendation_counts(recommendations, &ratings))
    }
}
