/// Image upload to inline data URL
pub mod application;
pub mod commands;

pub use application::UploadService;
