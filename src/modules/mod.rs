pub mod health;
pub mod movie;
pub mod notification;
pub mod rating;
pub mod upload;
pub mod user;
