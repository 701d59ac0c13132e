pub mod aggregation;
pub mod recommendation;

pub use aggregation::{aggregate, RatingStats};
pub use recommendation::{bad_recommendation_counts, is_bad_recommendation, rank};
