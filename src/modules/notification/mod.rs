/// Append-only activity feed
pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::NotificationService;
pub use domain::{ActivityEvent, Notification, NotificationRepository};
pub use infrastructure::NotificationRepositoryImpl;
