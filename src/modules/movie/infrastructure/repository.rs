use std::sync::Arc;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use crate::modules::movie::domain::{
    entities::{Movie, Recommendation},
    repository::MovieRepository,
};
use crate::modules::movie::infrastructure::models::{
    recommender_rows, MovieChangeset, MovieModel, NewMovie, RecommenderModel,
};
use crate::modules::user::domain::entities::User;
use crate::modules::user::infrastructure::models::UserModel;
use crate::schema::{movie_recommenders, movies, users};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::Database;
use crate::shared::utils::logger::TimedOperation;

pub struct MovieRepositoryImpl {
    db: Arc<Database>,
}

impl MovieRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn replace_recommenders(
        conn: &mut PgConnection,
        movie_id: Uuid,
        user_ids: &[Uuid],
    ) -> AppResult<()> {
        diesel::delete(movie_recommenders::table.filter(movie_recommenders::movie_id.eq(movie_id)))
            .execute(conn)?;

        if !user_ids.is_empty() {
            diesel::insert_into(movie_recommenders::table)
                .values(recommender_rows(movie_id, user_ids))
                .execute(conn)?;
        }
        Ok(())
    }
}

#[async_trait]
impl MovieRepository for MovieRepositoryImpl {
    async fn list(&self) -> AppResult<Vec<Movie>> {
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<MovieModel>> {
            let timer = TimedOperation::new("list", "movies");
            let mut conn = db.get_connection()?;
            let rows = movies::table
                .order((movies::created_at.desc(), movies::id.asc()))
                .select(MovieModel::as_select())
                .load(&mut conn)?;
            timer.finish();
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Movie>> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<Option<MovieModel>> {
            let mut conn = db.get_connection()?;
            let m = movies::table
                .find(id)
                .select(MovieModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(m)
        })
        .await??;

        Ok(model.map(Movie::from))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Movie>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<MovieModel>> {
            let mut conn = db.get_connection()?;
            let rows = movies::table
                .filter(movies::id.eq_any(ids))
                .select(MovieModel::as_select())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(Movie::from).collect())
    }

    async fn create(&self, movie: &Movie, recommender_ids: Vec<Uuid>) -> AppResult<Movie> {
        let db = Arc::clone(&self.db);
        let movie = movie.clone();

        let model = task::spawn_blocking(move || -> AppResult<MovieModel> {
            let timer = TimedOperation::new("insert", "movies");
            let mut conn = db.get_connection()?;
            let inserted = conn.transaction::<_, AppError, _>(|conn| {
                let inserted = diesel::insert_into(movies::table)
                    .values(NewMovie::from(&movie))
                    .returning(MovieModel::as_returning())
                    .get_result(conn)?;

                if !recommender_ids.is_empty() {
                    diesel::insert_into(movie_recommenders::table)
                        .values(recommender_rows(movie.id, &recommender_ids))
                        .execute(conn)?;
                }
                Ok(inserted)
            })?;
            timer.finish();
            Ok(inserted)
        })
        .await??;

        Ok(Movie::from(model))
    }

    async fn update(
        &self,
        movie: &Movie,
        recommender_ids: Option<Vec<Uuid>>,
    ) -> AppResult<Movie> {
        let db = Arc::clone(&self.db);
        let movie = movie.clone();

        let model = task::spawn_blocking(move || -> AppResult<Option<MovieModel>> {
            let mut conn = db.get_connection()?;
            conn.transaction::<_, AppError, _>(|conn| {
                let updated = diesel::update(movies::table.find(movie.id))
                    .set(MovieChangeset::from(&movie))
                    .returning(MovieModel::as_returning())
                    .get_result(conn)
                    .optional()?;

                if updated.is_some() {
                    if let Some(ids) = &recommender_ids {
                        Self::replace_recommenders(conn, movie.id, ids)?;
                    }
                }
                Ok(updated)
            })
        })
        .await??;

        model
            .map(Movie::from)
            .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        let affected = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            let n = diesel::delete(movies::table.find(id)).execute(&mut conn)?;
            Ok(n)
        })
        .await??;

        if affected == 0 {
            return Err(AppError::NotFound("Movie not found".to_string()));
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<i64> {
            let mut conn = db.get_connection()?;
            let n = movies::table.count().get_result(&mut conn)?;
            Ok(n)
        })
        .await?
    }

    async fn recommenders(&self, movie_id: Uuid) -> AppResult<Vec<User>> {
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<UserModel>> {
            let mut conn = db.get_connection()?;
            let rows = movie_recommenders::table
                .inner_join(users::table)
                .filter(movie_recommenders::movie_id.eq(movie_id))
                .order((users::created_at.asc(), users::id.asc()))
                .select(UserModel::as_select())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn recommendations(&self) -> AppResult<Vec<Recommendation>> {
        let db = Arc::clone(&self.db);

        let rows = task::spawn_blocking(move || -> AppResult<Vec<RecommenderModel>> {
            let mut conn = db.get_connection()?;
            let rows = movie_recommenders::table
                .select(RecommenderModel::as_select())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(rows.into_iter().map(Recommendation::from).collect())
    }

    async fn recommended_movie_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Uuid>> {
            let mut conn = db.get_connection()?;
            let ids = movie_recommenders::table
                .filter(movie_recommenders::user_id.eq(user_id))
                .select(movie_recommenders::movie_id)
                .load(&mut conn)?;
            Ok(ids)
        })
        .await?
    }
}
