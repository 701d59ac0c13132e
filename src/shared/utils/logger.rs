use crate::shared::config::{AppConfig, Environment};
use log::{debug, error, info, warn};

/// Initialize the logging system from the process configuration.
///
/// Call once from `main`; `RUST_LOG` overrides the defaults below. A second
/// call (as happens across integration tests) is ignored.
pub fn init_logger(config: &AppConfig) {
    let app_level = match config.environment {
        Environment::Development => log::LevelFilter::Debug,
        Environment::Production => log::LevelFilter::Info,
    };

    let result = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .filter_module("cinema_club_lib", app_level)
        .filter_module("diesel", log::LevelFilter::Warn) // Reduce diesel noise
        .filter_module("hyper", log::LevelFilter::Warn)
        .filter_module("tokio", log::LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized ({} environment)",
            config.environment
        );
    }
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log database operations
    pub fn db_operation(operation: &str, table: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => debug!("DB: {} on {} completed in {}ms", operation, table, duration),
            None => debug!("DB: Starting {} on {}", operation, table),
        }
    }

    /// Log a domain write that produced an entity
    pub fn entity_written(action: &str, entity: &str, id: &uuid::Uuid) {
        info!("{} {} {}", action, entity, id);
    }

    /// Log a failed side effect that must not abort the caller
    pub fn side_effect_failed(effect: &str, error: &dyn std::error::Error) {
        warn!("{} failed (ignored): {}", effect, error);
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => warn!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => debug!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: &'static str,
    table: &'static str,
}

impl TimedOperation {
    pub fn new(operation: &'static str, table: &'static str) -> Self {
        LogContext::db_operation(operation, table, None);
        Self {
            start: std::time::Instant::now(),
            operation,
            table,
        }
    }

    pub fn finish(self) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::db_operation(self.operation, self.table, Some(duration));
        duration
    }
}
