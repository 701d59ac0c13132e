pub mod entities;
pub mod events;
pub mod repository;
pub mod value_objects;

pub use entities::Notification;
pub use events::ActivityEvent;
pub use repository::NotificationRepository;
pub use value_objects::{EntityType, NotificationType};
