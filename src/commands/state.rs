use std::sync::Arc;

use axum::extract::FromRef;

use crate::modules::{
    health::HealthService,
    movie::{MovieRepository, MovieRepositoryImpl, MovieService},
    notification::{NotificationRepository, NotificationRepositoryImpl, NotificationService},
    rating::{RatingRepository, RatingRepositoryImpl, RatingService},
    upload::UploadService,
    user::{UserRepository, UserRepositoryImpl, UserService},
};
use crate::shared::{AppConfig, Database};

/// Everything handlers can extract. Each service is reachable on its own
/// through `State<Arc<...>>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub movies: Arc<MovieService>,
    pub users: Arc<UserService>,
    pub ratings: Arc<RatingService>,
    pub notifications: Arc<NotificationService>,
    pub uploads: Arc<UploadService>,
    pub health: Arc<HealthService>,
}

impl AppState {
    pub fn new(database: Arc<Database>, config: Arc<AppConfig>) -> Self {
        // Repositories
        let movie_repo: Arc<dyn MovieRepository> =
            Arc::new(MovieRepositoryImpl::new(Arc::clone(&database)));
        let user_repo: Arc<dyn UserRepository> =
            Arc::new(UserRepositoryImpl::new(Arc::clone(&database)));
        let rating_repo: Arc<dyn RatingRepository> =
            Arc::new(RatingRepositoryImpl::new(Arc::clone(&database)));
        let notification_repo: Arc<dyn NotificationRepository> =
            Arc::new(NotificationRepositoryImpl::new(Arc::clone(&database)));

        // Services
        let notifications = Arc::new(NotificationService::new(
            notification_repo,
            config.notifications.clone(),
        ));

        let movies = Arc::new(MovieService::new(
            Arc::clone(&movie_repo),
            Arc::clone(&rating_repo),
            Arc::clone(&user_repo),
            Arc::clone(&notifications),
        ));

        let users = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&movie_repo),
            Arc::clone(&rating_repo),
            Arc::clone(&notifications),
        ));

        let ratings = Arc::new(RatingService::new(
            rating_repo,
            Arc::clone(&movie_repo),
            user_repo,
            Arc::clone(&notifications),
        ));

        let uploads = Arc::new(UploadService::new(&config.uploads));
        let health = Arc::new(HealthService::new(database, Arc::clone(&config), movie_repo));

        Self {
            config,
            movies,
            users,
            ratings,
            notifications,
            uploads,
            health,
        }
    }
}
