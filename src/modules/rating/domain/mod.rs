pub mod entities;
pub mod repository;
pub mod services;

pub use entities::Rating;
pub use repository::RatingRepository;
