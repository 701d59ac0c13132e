// Shared kernel used by every bounded context

pub mod config; // Process configuration
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (database)
pub mod utils; // Logging, validation, serde helpers

pub use config::AppConfig;
pub use infrastructure::database::Database;
