use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use uuid::Uuid;

use super::dto::{CreateMovieRequest, MovieDetail, MovieListItem, UpdateMovieRequest};
use crate::modules::movie::domain::{entities::Movie, repository::MovieRepository};
use crate::modules::notification::application::NotificationService;
use crate::modules::notification::domain::events::ActivityEvent;
use crate::modules::rating::application::dto::index_by_id;
use crate::modules::rating::domain::{entities::Rating, repository::RatingRepository};
use crate::modules::user::domain::{
    entities::{User, UserSummary},
    repository::UserRepository,
};
use crate::shared::errors::{AppError, AppResult, ConflictContext};
use crate::shared::utils::logger::LogContext;
use crate::shared::utils::Validator;
use crate::log_debug;

pub struct MovieService {
    movie_repo: Arc<dyn MovieRepository>,
    rating_repo: Arc<dyn RatingRepository>,
    user_repo: Arc<dyn UserRepository>,
    notifications: Arc<NotificationService>,
}

impl MovieService {
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        rating_repo: Arc<dyn RatingRepository>,
        user_repo: Arc<dyn UserRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            movie_repo,
            rating_repo,
            user_repo,
            notifications,
        }
    }

    /// All movies, newest first, with statistics and threaded ratings.
    pub async fn list_movies(&self) -> AppResult<Vec<MovieListItem>> {
        let movies = self.movie_repo.list().await?;
        let ids = movies.iter().map(|m| m.id).collect();
        let ratings = self.rating_repo.find_by_movies(ids).await?;
        let users = self.authors_of(&ratings).await?;

        let mut by_movie: HashMap<Uuid, Vec<Rating>> = HashMap::new();
        for rating in ratings {
            by_movie.entry(rating.movie_id).or_default().push(rating);
        }

        log_debug!("Listing {} movies", movies.len());
        Ok(movies
            .iter()
            .map(|movie| {
                let rows = by_movie.get(&movie.id).map(Vec::as_slice).unwrap_or(&[]);
                MovieListItem::new(movie, rows, &users)
            })
            .collect())
    }

    pub async fn get_movie(&self, id: Uuid) -> AppResult<MovieDetail> {
        let movie = self
            .movie_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;
        self.detail(movie).await
    }

    pub async fn create_movie(&self, request: CreateMovieRequest) -> AppResult<MovieDetail> {
        let title = Validator::validate_movie_title(request.title.as_deref())?;
        let image = Validator::normalize_image(request.image.as_deref())?;
        let recommender_ids = match &request.recommender_ids {
            Some(raw) => self.known_recommenders(raw).await?,
            None => Vec::new(),
        };

        let movie = Movie::new(title, image);
        let saved = self
            .movie_repo
            .create(&movie, recommender_ids)
            .await
            .on_conflict("Movie already exists")?;

        LogContext::entity_written("Created", "movie", &saved.id);
        self.notifications
            .record(ActivityEvent::MovieCreated {
                movie_id: saved.id,
                title: saved.title.clone(),
            })
            .await;

        self.detail(saved).await
    }

    /// Title is required; image and recommenders change only when present.
    pub async fn update_movie(
        &self,
        id: Uuid,
        request: UpdateMovieRequest,
    ) -> AppResult<MovieDetail> {
        let title = Validator::validate_movie_title(request.title.as_deref())?;
        let image = match &request.image {
            Some(image) => Some(Validator::normalize_image(image.as_deref())?),
            None => None,
        };
        let recommender_ids = match &request.recommender_ids {
            Some(raw) => Some(self.known_recommenders(raw).await?),
            None => None,
        };

        let mut movie = self
            .movie_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

        movie.retitle(title);
        if let Some(image) = image {
            movie.replace_image(image);
        }

        let saved = self
            .movie_repo
            .update(&movie, recommender_ids)
            .await
            .on_conflict("Movie title already exists")?;

        LogContext::entity_written("Updated", "movie", &saved.id);
        self.notifications
            .record(ActivityEvent::MovieUpdated {
                movie_id: saved.id,
                title: saved.title.clone(),
            })
            .await;

        self.detail(saved).await
    }

    pub async fn delete_movie(&self, id: Uuid) -> AppResult<()> {
        self.movie_repo.delete(id).await?;
        LogContext::entity_written("Deleted", "movie", &id);
        Ok(())
    }

    async fn detail(&self, movie: Movie) -> AppResult<MovieDetail> {
        let ratings = self.rating_repo.find_by_movies(vec![movie.id]).await?;
        let users = self.authors_of(&ratings).await?;
        let recommenders = self.movie_repo.recommenders(movie.id).await?;

        Ok(MovieDetail {
            movie: MovieListItem::new(&movie, &ratings, &users),
            recommenders: recommenders.iter().map(UserSummary::from).collect(),
        })
    }

    async fn authors_of(&self, ratings: &[Rating]) -> AppResult<HashMap<Uuid, User>> {
        let ids: BTreeSet<Uuid> = ratings.iter().map(|r| r.user_id).collect();
        let users = self.user_repo.find_by_ids(ids.into_iter().collect()).await?;
        Ok(index_by_id(users, |u| u.id))
    }

    /// Parses recommender ids and checks that every one is a known user.
    async fn known_recommenders(&self, raw: &[String]) -> AppResult<Vec<Uuid>> {
        let ids = Validator::parse_ids("recommenderIds", raw)?;
        if ids.is_empty() {
            return Ok(ids);
        }

        let found = self.user_repo.find_by_ids(ids.clone()).await?;
        if found.len() != ids.len() {
            return Err(AppError::ValidationError(
                "recommenderIds contains unknown users".to_string(),
            ));
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::movie::domain::repository::MockMovieRepository;
    use crate::modules::notification::domain::repository::MockNotificationRepository;
    use crate::modules::notification::domain::value_objects::NotificationType;
    use crate::modules::rating::domain::repository::MockRatingRepository;
    use crate::modules::user::domain::repository::MockUserRepository;
    use crate::shared::config::NotificationConfig;

    struct Mocks {
        movies: MockMovieRepository,
        ratings: MockRatingRepository,
        users: MockUserRepository,
        feed: MockNotificationRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                movies: MockMovieRepository::new(),
                ratings: MockRatingRepository::new(),
                users: MockUserRepository::new(),
                feed: MockNotificationRepository::new(),
            }
        }

        fn service(self) -> MovieService {
            let notifications = Arc::new(NotificationService::new(
                Arc::new(self.feed),
                NotificationConfig {
                    default_limit: 50,
                    max_limit: 200,
                },
            ));
            MovieService::new(
                Arc::new(self.movies),
                Arc::new(self.ratings),
                Arc::new(self.users),
                notifications,
            )
        }

        /// A movie with no ratings and no recommenders.
        fn empty_detail(&mut self) {
            self.ratings
                .expect_find_by_movies()
                .returning(|_| Ok(Vec::new()));
            self.users.expect_find_by_ids().returning(|_| Ok(Vec::new()));
            self.movies
                .expect_recommenders()
                .returning(|_| Ok(Vec::new()));
        }
    }

    #[tokio::test]
    async fn create_requires_title() {
        let err = Mocks::new()
            .service()
            .create_movie(CreateMovieRequest {
                title: Some("   ".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, AppError::ValidationError("Title is required".into()));
    }

    #[tokio::test]
    async fn create_returns_unrated_movie_and_records_notification() {
        let mut mocks = Mocks::new();
        mocks
            .movies
            .expect_create()
            .withf(|movie, ids| movie.title == "F1" && movie.image.is_none() && ids.is_empty())
            .times(1)
            .returning(|movie, _| Ok(movie.clone()));
        mocks.empty_detail();
        mocks
            .feed
            .expect_append()
            .withf(|n| n.notification_type == NotificationType::MovieCreate)
            .times(1)
            .returning(|_| Ok(()));

        let detail = mocks
            .service()
            .create_movie(CreateMovieRequest {
                title: Some("F1".into()),
                image: Some(String::new()),
                recommender_ids: None,
            })
            .await
            .unwrap();

        assert_eq!(detail.movie.title, "F1");
        assert_eq!(detail.movie.average_rating, 0.0);
        assert_eq!(detail.movie.rating_count, 0);
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict() {
        let mut mocks = Mocks::new();
        mocks
            .movies
            .expect_create()
            .returning(|_, _| Err(AppError::Conflict("movies_title_key".into())));

        let err = mocks
            .service()
            .create_movie(CreateMovieRequest {
                title: Some("F1".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, AppError::Conflict("Movie already exists".into()));
    }

    #[tokio::test]
    async fn get_movie_aggregates_top_level_ratings_only() {
        let ana = User::new("Ana".into(), "🎬".into());
        let bo = User::new("Bo".into(), "🍿".into());
        let movie = Movie::new("F1".into(), None);
        let top = Rating::top_level(movie.id, ana.id, 4, None);
        let reply = Rating::reply(&top, bo.id, Some(1), Some("nope".into()));

        let mut mocks = Mocks::new();
        let m = movie.clone();
        mocks
            .movies
            .expect_find_by_id()
            .returning(move |_| Ok(Some(m.clone())));
        let rows = vec![top.clone(), reply.clone()];
        mocks
            .ratings
            .expect_find_by_movies()
            .returning(move |_| Ok(rows.clone()));
        let authors = vec![ana.clone(), bo.clone()];
        mocks
            .users
            .expect_find_by_ids()
            .returning(move |_| Ok(authors.clone()));
        let recommender = bo.clone();
        mocks
            .movies
            .expect_recommenders()
            .returning(move |_| Ok(vec![recommender.clone()]));

        let detail = mocks.service().get_movie(movie.id).await.unwrap();

        assert_eq!(detail.movie.average_rating, 4.0);
        assert_eq!(detail.movie.rating_count, 1);
        assert_eq!(detail.movie.ratings.len(), 1);
        assert_eq!(detail.movie.ratings[0].replies[0].id, reply.id);
        assert_eq!(detail.recommenders[0].name, "Bo");
    }

    #[tokio::test]
    async fn get_missing_movie_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.movies.expect_find_by_id().returning(|_| Ok(None));

        let err = mocks.service().get_movie(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err, AppError::NotFound("Movie not found".into()));
    }

    #[tokio::test]
    async fn update_keeps_image_when_absent_and_replaces_recommenders() {
        let ana = User::new("Ana".into(), "🎬".into());
        let movie = Movie::new("F1".into(), Some("https://img/f1.png".into()));
        let ana_id = ana.id;

        let mut mocks = Mocks::new();
        let m = movie.clone();
        mocks
            .movies
            .expect_find_by_id()
            .returning(move |_| Ok(Some(m.clone())));
        mocks
            .users
            .expect_find_by_ids()
            .returning(move |ids| {
                Ok(if ids.is_empty() {
                    Vec::new()
                } else {
                    vec![ana.clone()]
                })
            });
        mocks
            .movies
            .expect_update()
            .withf(move |movie, ids| {
                movie.title == "F1: Redux"
                    && movie.image.as_deref() == Some("https://img/f1.png")
                    && ids.as_deref() == Some(&[ana_id][..])
            })
            .times(1)
            .returning(|movie, _| Ok(movie.clone()));
        mocks
            .ratings
            .expect_find_by_movies()
            .returning(|_| Ok(Vec::new()));
        mocks
            .movies
            .expect_recommenders()
            .returning(|_| Ok(Vec::new()));
        mocks.feed.expect_append().returning(|_| Ok(()));

        let detail = mocks
            .service()
            .update_movie(
                movie.id,
                UpdateMovieRequest {
                    title: Some("F1: Redux".into()),
                    image: None,
                    recommender_ids: Some(vec![ana_id.to_string()]),
                },
            )
            .await
            .unwrap();

        assert_eq!(detail.movie.title, "F1: Redux");
    }

    #[tokio::test]
    async fn update_with_null_image_clears_it() {
        let movie = Movie::new("F1".into(), Some("https://img/f1.png".into()));

        let mut mocks = Mocks::new();
        let m = movie.clone();
        mocks
            .movies
            .expect_find_by_id()
            .returning(move |_| Ok(Some(m.clone())));
        mocks
            .movies
            .expect_update()
            .withf(|movie, ids| movie.image.is_none() && ids.is_none())
            .times(1)
            .returning(|movie, _| Ok(movie.clone()));
        mocks.empty_detail();
        mocks.feed.expect_append().returning(|_| Ok(()));

        let detail = mocks
            .service()
            .update_movie(
                movie.id,
                UpdateMovieRequest {
                    title: Some("F1".into()),
                    image: Some(None),
                    recommender_ids: None,
                },
            )
            .await
            .unwrap();

        assert!(detail.movie.image.is_none());
    }

    #[tokio::test]
    async fn unknown_recommender_is_rejected() {
        let mut mocks = Mocks::new();
        mocks.users.expect_find_by_ids().returning(|_| Ok(Vec::new()));
        mocks.movies.expect_create().times(0);

        let err = mocks
            .service()
            .create_movie(CreateMovieRequest {
                title: Some("F1".into()),
                image: None,
                recommender_ids: Some(vec![Uuid::new_v4().to_string()]),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn delete_propagates_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .movies
            .expect_delete()
            .returning(|_| Err(AppError::NotFound("Movie not found".into())));

        let err = mocks.service().delete_movie(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
