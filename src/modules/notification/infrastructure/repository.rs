use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;

use crate::modules::notification::domain::{
    entities::Notification, repository::NotificationRepository,
};
use crate::modules::notification::infrastructure::models::NotificationModel;
use crate::schema::notifications;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::database::Database;

pub struct NotificationRepositoryImpl {
    db: Arc<Database>,
}

impl NotificationRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn append(&self, notification: &Notification) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let row = NotificationModel::from(notification);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            diesel::insert_into(notifications::table)
                .values(&row)
                .execute(&mut conn)?;
            Ok(())
        })
        .await?
    }

    async fn recent(&self, limit: i64) -> AppResult<Vec<Notification>> {
        let db = Arc::clone(&self.db);

        let models = task::spawn_blocking(move || -> AppResult<Vec<NotificationModel>> {
            let mut conn = db.get_connection()?;
            let rows = notifications::table
                .order((notifications::created_at.desc(), notifications::id.asc()))
                .limit(limit)
                .select(NotificationModel::as_select())
                .load(&mut conn)?;
            Ok(rows)
        })
        .await??;

        Ok(models.into_iter().map(Notification::from).collect())
    }
}
