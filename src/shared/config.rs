use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 10;
const DEFAULT_NOTIFICATION_LIMIT: i64 = 50;
const MAX_NOTIFICATION_LIMIT: i64 = 200;
const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set and {0} has no database.url entry")]
    MissingDatabaseUrl(String),

    #[error("Invalid database URL: must start with postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to parse {file}: {reason}")]
    InvalidFile { file: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Host part of the URL, for logging without credentials.
    pub fn display_host(&self) -> &str {
        self.url.rsplit('@').next().unwrap_or("unknown_host")
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub default_limit: i64,
    pub max_limit: i64,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_image_bytes: usize,
}

/// Process configuration, built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub notifications: NotificationConfig,
    pub uploads: UploadConfig,
}

// Shape of config.json; only the database URL is read from it.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    database: Option<FileDatabaseConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct FileDatabaseConfig {
    url: Option<String>,
}

impl AppConfig {
    /// Reads `.env`, the process environment and `config.json` in the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file_contents = Path::new(CONFIG_FILE)
            .exists()
            .then(|| std::fs::read_to_string(CONFIG_FILE).ok())
            .flatten();

        Self::from_sources(|key| std::env::var(key).ok(), file_contents.as_deref())
    }

    /// Builds the configuration from an environment lookup and optional
    /// `config.json` contents. Environment values take precedence.
    pub fn from_sources<F>(lookup: F, file_contents: Option<&str>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_config = match file_contents {
            Some(contents) => serde_json::from_str::<FileConfig>(contents).map_err(|e| {
                ConfigError::InvalidFile {
                    file: CONFIG_FILE.to_string(),
                    reason: e.to_string(),
                }
            })?,
            None => FileConfig::default(),
        };

        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .or_else(|| file_config.database.and_then(|d| d.url))
            .ok_or_else(|| ConfigError::MissingDatabaseUrl(CONFIG_FILE.to_string()))?;

        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(ConfigError::InvalidDatabaseUrl);
        }

        let environment = match lookup("APP_ENV").as_deref().map(str::trim) {
            None | Some("") | Some("production") => Environment::Production,
            Some("development") => Environment::Development,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "APP_ENV".to_string(),
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_pool_size: parse_or(&lookup, "DB_POOL_MAX_SIZE", DEFAULT_POOL_SIZE)?,
                connection_timeout_secs: parse_or(
                    &lookup,
                    "DB_CONNECTION_TIMEOUT_SECS",
                    DEFAULT_CONNECTION_TIMEOUT_SECS,
                )?,
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            },
            environment,
            notifications: NotificationConfig {
                default_limit: DEFAULT_NOTIFICATION_LIMIT,
                max_limit: MAX_NOTIFICATION_LIMIT,
            },
            uploads: UploadConfig {
                max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}
