use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use crate::modules::rating::domain::{entities::Rating, repository::RatingRepository};
use crate::modules::rating::infrastructure::models::{NewRating, RatingChangeset, RatingModel};
use crate::schema::ratings;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::Database;
use crate::shared::utils::logger::TimedOperation;

pub struct RatingRepositoryImpl {
    db: Arc<Database>,
}

impl RatingRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RatingRepository for RatingRepositoryImpl {
    async fn list(&self) -> AppResult<Vec<Rating>> {
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<RatingModel>> {
            let timer = TimedOperation::new("list", "ratings");
            let mut conn = db.get_connection()?;
            let rows = ratings::table
                .order((ratings::created_at.desc(), ratings::id.asc()))
                .select(RatingModel::as_select())
                .load(&mut conn)?;
            timer.finish();
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rating>> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<Option<RatingModel>> {
            let mut conn = db.get_connection()?;
            let m = ratings::table
                .find(id)
                .select(RatingModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(m)
        })
        .await??;

        Ok(model.map(Rating::from))
    }

    async fn find_by_movies(&self, movie_ids: Vec<Uuid>) -> AppResult<Vec<Rating>> {
        if movie_ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<RatingModel>> {
            let mut conn = db.get_connection()?;
            let rows = ratings::table
                .filter(ratings::movie_id.eq_any(movie_ids))
                .order((ratings::created_at.asc(), ratings::id.asc()))
                .select(RatingModel::as_select())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Rating>> {
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<RatingModel>> {
            let mut conn = db.get_connection()?;
            let rows = ratings::table
                .filter(ratings::user_id.eq(user_id))
                .order((ratings::created_at.desc(), ratings::id.asc()))
                .select(RatingModel::as_select())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(Rating::from).collect())
    }

    async fn create(&self, rating: &Rating) -> AppResult<Rating> {
        let db = Arc::clone(&self.db);
        let rating = rating.clone();

        let model = task::spawn_blocking(move || -> AppResult<RatingModel> {
            let timer = TimedOperation::new("insert", "ratings");
            let mut conn = db.get_connection()?;
            // ratings_one_top_level_per_user guards the (movie, user) pair
            let inserted = diesel::insert_into(ratings::table)
                .values(NewRating::from(&rating))
                .returning(RatingModel::as_returning())
                .get_result(&mut conn)?;
            timer.finish();
            Ok(inserted)
        })
        .await??;

        Ok(Rating::from(model))
    }

    async fn update(&self, rating: &Rating) -> AppResult<Rating> {
        let db = Arc::clone(&self.db);
        let rating = rating.clone();

        let model = task::spawn_blocking(move || -> AppResult<Option<RatingModel>> {
            let mut conn = db.get_connection()?;
            let updated = diesel::update(ratings::table.find(rating.id))
                .set(RatingChangeset::from(&rating))
                .returning(RatingModel::as_returning())
                .get_result(&mut conn)
                .optional()?;
            Ok(updated)
        })
        .await??;

        model
            .map(Rating::from)
            .ok_or_else(|| AppError::NotFound("Rating not found".to_string()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        let affected = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            let n = diesel::delete(ratings::table.find(id)).execute(&mut conn)?;
            Ok(n)
        })
        .await??;

        if affected == 0 {
            return Err(AppError::NotFound("Rating not found".to_string()));
        }
        Ok(())
    }
}
