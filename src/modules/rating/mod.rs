/// Ratings and threaded replies
///
/// Also home of the read-time aggregation rules (movie averages and
/// bad-recommendation classification) shared by the movie and user contexts.
pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::RatingService;
pub use domain::{Rating, RatingRepository};
pub use infrastructure::RatingRepositoryImpl;
