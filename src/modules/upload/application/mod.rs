pub mod service;

pub use service::{UploadService, UploadedImage};
