use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use crate::modules::user::domain::{entities::User, repository::UserRepository};
use crate::modules::user::infrastructure::models::{NewUser, UserChangeset, UserModel};
use crate::schema::users;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::Database;
use crate::shared::utils::logger::TimedOperation;

pub struct UserRepositoryImpl {
    db: Arc<Database>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn list(&self) -> AppResult<Vec<User>> {
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<UserModel>> {
            let timer = TimedOperation::new("list", "users");
            let mut conn = db.get_connection()?;
            let rows = users::table
                .order((users::created_at.asc(), users::id.asc()))
                .select(UserModel::as_select())
                .load(&mut conn)?;
            timer.finish();
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<Option<UserModel>> {
            let mut conn = db.get_connection()?;
            let m = users::table
                .find(id)
                .select(UserModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(m)
        })
        .await??;

        Ok(model.map(User::from))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<UserModel>> {
            let mut conn = db.get_connection()?;
            let rows = users::table
                .filter(users::id.eq_any(ids))
                .order(users::created_at.asc())
                .select(UserModel::as_select())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let db = Arc::clone(&self.db);
        let user = user.clone();

        let model = task::spawn_blocking(move || -> AppResult<UserModel> {
            let timer = TimedOperation::new("insert", "users");
            let mut conn = db.get_connection()?;
            let inserted = diesel::insert_into(users::table)
                .values(NewUser::from(&user))
                .returning(UserModel::as_returning())
                .get_result(&mut conn)?;
            timer.finish();
            Ok(inserted)
        })
        .await??;

        Ok(User::from(model))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let db = Arc::clone(&self.db);
        let user = user.clone();

        let model = task::spawn_blocking(move || -> AppResult<Option<UserModel>> {
            let mut conn = db.get_connection()?;
            let updated = diesel::update(users::table.find(user.id))
                .set(UserChangeset::from(&user))
                .returning(UserModel::as_returning())
                .get_result(&mut conn)
                .optional()?;
            Ok(updated)
        })
        .await??;

        model
            .map(User::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        let affected = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            // ratings and movie_recommenders rows go with it (ON DELETE CASCADE)
            let n = diesel::delete(users::table.find(id)).execute(&mut conn)?;
            Ok(n)
        })
        .await??;

        if affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
