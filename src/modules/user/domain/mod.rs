pub mod entities;
pub mod repository;

pub use entities::{User, UserSummary};
pub use repository::UserRepository;
