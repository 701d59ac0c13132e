use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::application::dto::{CreateUserRequest, UpdateUserRequest, UserDetail, UserListItem};
use super::application::service::UserService;
use super::domain::entities::User;
use crate::commands::extract::{AppJson, AppPath, Deleted};
use crate::shared::errors::AppResult;

pub async fn list_users(
    State(user_service): State<Arc<UserService>>,
) -> AppResult<Json<Vec<UserListItem>>> {
    let users = user_service.list_users().await?;
    Ok(Json(users))
}

pub async fn leaderboard(
    State(user_service): State<Arc<UserService>>,
) -> AppResult<Json<Vec<UserListItem>>> {
    let users = user_service.leaderboard().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(user_service): State<Arc<UserService>>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<UserDetail>> {
    let user = user_service.get_user(id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(user_service): State<Arc<UserService>>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = user_service.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(user_service): State<Arc<UserService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    let user = user_service.update_user(id, request).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(user_service): State<Arc<UserService>>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<Deleted>> {
    user_service.delete_user(id).await?;
    Ok(Json(Deleted::OK))
}
