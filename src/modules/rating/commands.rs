use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::application::dto::{CreateRatingRequest, RatingDetail, UpdateRatingRequest};
use super::application::service::RatingService;
use crate::commands::extract::{AppJson, AppPath, Deleted};
use crate::shared::errors::AppResult;

pub async fn list_ratings(
    State(rating_service): State<Arc<RatingService>>,
) -> AppResult<Json<Vec<RatingDetail>>> {
    let ratings = rating_service.list_ratings().await?;
    Ok(Json(ratings))
}

pub async fn create_rating(
    State(rating_service): State<Arc<RatingService>>,
    AppJson(request): AppJson<CreateRatingRequest>,
) -> AppResult<(StatusCode, Json<RatingDetail>)> {
    let rating = rating_service.create_rating(request).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

pub async fn update_rating(
    State(rating_service): State<Arc<RatingService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateRatingRequest>,
) -> AppResult<Json<RatingDetail>> {
    let rating = rating_service.update_rating(id, request).await?;
    Ok(Json(rating))
}

pub async fn delete_rating(
    State(rating_service): State<Arc<RatingService>>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<Deleted>> {
    rating_service.delete_rating(id).await?;
    Ok(Json(Deleted::OK))
}
