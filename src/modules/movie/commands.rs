use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use super::application::dto::{CreateMovieRequest, MovieDetail, MovieListItem, UpdateMovieRequest};
use super::application::service::MovieService;
use crate::commands::extract::{AppJson, AppPath, Deleted};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;

/// A failed listing still answers with an empty array, alongside the 500.
pub async fn list_movies(State(movie_service): State<Arc<MovieService>>) -> Response {
    match movie_service.list_movies().await {
        Ok(movies) => Json(movies).into_response(),
        Err(e) => {
            LogContext::error_with_context(&e, "Listing movies");
            let empty: Vec<MovieListItem> = Vec::new();
            (StatusCode::INTERNAL_SERVER_ERROR, Json(empty)).into_response()
        }
    }
}

pub async fn get_movie(
    State(movie_service): State<Arc<MovieService>>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<MovieDetail>> {
    let movie = movie_service.get_movie(id).await?;
    Ok(Json(movie))
}

pub async fn create_movie(
    State(movie_service): State<Arc<MovieService>>,
    AppJson(request): AppJson<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<MovieDetail>)> {
    let movie = movie_service.create_movie(request).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie(
    State(movie_service): State<Arc<MovieService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateMovieRequest>,
) -> AppResult<Json<MovieDetail>> {
    let movie = movie_service.update_movie(id, request).await?;
    Ok(Json(movie))
}

pub async fn delete_movie(
    State(movie_service): State<Arc<MovieService>>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<Deleted>> {
    movie_service.delete_movie(id).await?;
    Ok(Json(Deleted::OK))
}
