pub mod dto;
pub mod service;

pub use dto::{CreateUserRequest, UpdateUserRequest, UserDetail, UserListItem, UserRatingEntry};
pub use service::UserService;
