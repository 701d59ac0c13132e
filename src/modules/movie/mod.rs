/// Movies and the users who recommended them
pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::MovieService;
pub use domain::{Movie, MovieRepository};
pub use infrastructure::MovieRepositoryImpl;
