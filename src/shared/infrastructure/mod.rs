/// Shared infrastructure concerns
///
/// Infrastructure used by more than one bounded context.
pub mod database;

pub use database::{Database, DbConnection, DbPool};
