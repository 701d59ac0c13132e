pub mod dto;
pub mod service;

pub use dto::{CreateRatingRequest, RatingDetail, RatingView, UpdateRatingRequest};
pub use service::RatingService;
