use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Ok,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub database_url: CheckResult,
    pub database_connection: CheckResult,
    pub store_query: CheckResult,
}

impl HealthChecks {
    pub fn all_ok(&self) -> bool {
        self.database_url.is_ok() && self.database_connection.is_ok() && self.store_query.is_ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub checks: HealthChecks,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

impl HealthReport {
    pub fn new(checks: HealthChecks, environment: String) -> Self {
        let status = if checks.all_ok() {
            OverallStatus::Healthy
        } else {
            OverallStatus::Unhealthy
        };

        Self {
            status,
            checks,
            timestamp: Utc::now(),
            environment,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == OverallStatus::Healthy
    }
}
