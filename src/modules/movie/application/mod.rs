pub mod dto;
pub mod service;

pub use dto::{CreateMovieRequest, MovieDetail, MovieListItem, UpdateMovieRequest};
pub use service::MovieService;
