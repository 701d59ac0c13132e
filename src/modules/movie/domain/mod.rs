pub mod entities;
pub mod repository;

pub use entities::{Movie, MovieRef, MovieSummary, Recommendation};
pub use repository::MovieRepository;
