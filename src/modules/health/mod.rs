pub mod application;
pub mod commands;

pub use application::HealthService;
