pub mod dto;
pub mod service;

pub use dto::{CheckResult, CheckStatus, HealthChecks, HealthReport};
pub use service::HealthService;
