use std::sync::Arc;

use tokio::task;

use super::dto::{CheckResult, HealthChecks, HealthReport};
use crate::modules::movie::domain::repository::MovieRepository;
use crate::shared::config::AppConfig;
use crate::shared::infrastructure::Database;
use crate::log_warn;

/// Liveness and readiness: configuration, pool connectivity and one real query.
pub struct HealthService {
    db: Arc<Database>,
    config: Arc<AppConfig>,
    movie_repo: Arc<dyn MovieRepository>,
}

impl HealthService {
    pub fn new(
        db: Arc<Database>,
        config: Arc<AppConfig>,
        movie_repo: Arc<dyn MovieRepository>,
    ) -> Self {
        Self {
            db,
            config,
            movie_repo,
        }
    }

    pub async fn check(&self) -> HealthReport {
        let database_url = self.check_database_url();
        let database_connection = self.check_connection().await;
        let store_query = if database_connection.is_ok() {
            self.check_store_query().await
        } else {
            CheckResult::error("Skipped: no database connection")
        };

        let report = HealthReport::new(
            HealthChecks {
                database_url,
                database_connection,
                store_query,
            },
            self.config.environment.to_string(),
        );

        if !report.is_healthy() {
            log_warn!("Health check failed: {:?}", report.checks);
        }
        report
    }

    fn check_database_url(&self) -> CheckResult {
        if self.config.database.url.trim().is_empty() {
            CheckResult::error("Database URL is not configured")
        } else {
            CheckResult::ok(format!(
                "Database URL is configured ({})",
                self.config.database.display_host()
            ))
        }
    }

    async fn check_connection(&self) -> CheckResult {
        let db = Arc::clone(&self.db);
        match task::spawn_blocking(move || db.ping()).await {
            Ok(Ok(())) => {
                let pool = self.db.pool_status();
                CheckResult::ok(format!(
                    "Database connection succeeded ({}/{} pooled connections idle)",
                    pool.idle_connections, pool.max_size
                ))
            }
            Ok(Err(e)) => CheckResult::error(format!("Database connection failed: {}", e)),
            Err(e) => CheckResult::error(format!("Database connection check panicked: {}", e)),
        }
    }

    async fn check_store_query(&self) -> CheckResult {
        match self.movie_repo.count().await {
            Ok(count) => CheckResult::ok(format!("Store query succeeded ({} movies)", count)),
            Err(e) => CheckResult::error(format!("Store query failed: {}", e)),
        }
    }
}
