/// Club members and their recommendation record
pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::UserService;
pub use domain::{User, UserRepository};
pub use infrastructure::UserRepositoryImpl;
