use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::middleware::report_errors;
use super::state::AppState;
use crate::modules::{
    health::commands::*, movie::commands::*, notification::commands::*, rating::commands::*,
    upload::commands::*, user::commands::*,
};

/// Single source of truth for the HTTP surface.
pub fn build_router(state: AppState) -> Router {
    // Oversized uploads must reach the size check instead of failing as a 413.
    let upload_limit = DefaultBodyLimit::max(state.uploads.max_bytes().saturating_mul(2));
    // Movie images and user icons may hold any data URL an upload returns.
    let image_limit = DefaultBodyLimit::max(state.uploads.max_json_body_bytes());

    Router::new()
        // Movies
        .route(
            "/movies",
            get(list_movies).post(create_movie).layer(image_limit),
        )
        .route(
            "/movies/{id}",
            get(get_movie)
                .put(update_movie)
                .delete(delete_movie)
                .layer(image_limit),
        )
        // Ratings and replies
        .route("/ratings", get(list_ratings).post(create_rating))
        .route("/ratings/{id}", put(update_rating).delete(delete_rating))
        // Users
        .route("/users", get(list_users).post(create_user).layer(image_limit))
        .route("/users/leaderboard", get(leaderboard))
        .route(
            "/users/{id}",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .layer(image_limit),
        )
        // Activity feed
        .route("/notifications", get(list_notifications))
        // Uploads
        .route("/upload", post(upload_image).layer(upload_limit))
        // Health
        .route("/health", get(health_check))
        .layer(middleware::from_fn_with_state(state.clone(), report_errors))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
