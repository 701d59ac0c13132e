/// Isolated test database utility that creates and cleans up temporary databases.
/// Each test gets its own database that is dropped when the test completes.
///
/// Uses TEST_DATABASE_URL to reach the test database server. When it is not
/// set, `TestDb::try_new` returns `None` and the calling test is skipped.
use cinema_club_lib::shared::Database;
use diesel::r2d2::{self, ConnectionManager};
use diesel::{sql_query, Connection, PgConnection, RunQueryDsl};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct TestDb {
    server_url: String,
    name: String,
    database: Arc<Database>,
}

impl TestDb {
    /// Creates and migrates a database named `test_db_{pid}_{counter}`.
    pub fn try_new() -> Option<Self> {
        dotenvy::dotenv().ok();

        let Ok(server_url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        };

        let name = format!(
            "test_db_{}_{}",
            std::process::id(),
            TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let mut conn = PgConnection::establish(&server_url)
            .expect("Failed to connect to test database server");
        sql_query(format!("CREATE DATABASE {}", name))
            .execute(&mut conn)
            .unwrap_or_else(|e| panic!("Failed to create test database {}: {}", name, e));

        // Replace the database name (everything after the last '/')
        let last_slash = server_url
            .rfind('/')
            .unwrap_or_else(|| panic!("Invalid TEST_DATABASE_URL format: {}", server_url));
        let isolated_url = format!("{}/{}", &server_url[..last_slash], name);

        let pool = r2d2::Pool::builder()
            .max_size(5)
            .test_on_check_out(true)
            .build(ConnectionManager::<PgConnection>::new(isolated_url))
            .expect("Failed to build test database connection pool");

        let database = Arc::new(Database::from_pool(pool));
        database
            .run_migrations()
            .expect("Unable to migrate the test database");

        Some(Self {
            server_url,
            name,
            database,
        })
    }

    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.database)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TestDb {
    /// Terminates connections and drops the database. After a panic the
    /// database is left in place for debugging.
    fn drop(&mut self) {
        if thread::panicking() {
            eprintln!(
                "TestDb leaking database '{}' due to panic, preserved for debugging",
                self.name
            );
            return;
        }

        let mut conn = match PgConnection::establish(&self.server_url) {
            Ok(conn) => conn,
            Err(e) => {
                eprintln!("Failed to connect for cleanup of '{}': {}", self.name, e);
                return;
            }
        };

        let _ = sql_query(format!(
            "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}'",
            self.name
        ))
        .execute(&mut conn);

        if let Err(e) = sql_query(format!("DROP DATABASE IF EXISTS {}", self.name)).execute(&mut conn) {
            eprintln!("Failed to drop test database '{}': {}", self.name, e);
        }
    }
}
