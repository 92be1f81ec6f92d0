//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Duration, FixedOffset};
use quill_core::domain::AllowedExtensions;
use quill_infra::database::DatabaseConfig;

/// Longest accepted session lifetime: one year.
const MAX_SESSION_TTL_MINUTES: i64 = 525_600;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub run_migrations: bool,
    pub session: SessionConfig,
    pub uploads: UploadConfig,
    /// Timezone in which post creation times are recorded.
    pub post_offset: FixedOffset,
}

/// Login session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Signing secret for session tokens. `None` means one is generated at
    /// startup.
    pub secret: Option<String>,
    pub ttl: Duration,
    pub cookie_secure: bool,
}

/// Static assets and image upload settings.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub allowed_extensions: AllowedExtensions,
    pub max_bytes: usize,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database = DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?,
        };

        let ttl_minutes: i64 = parse_or(&lookup, "SESSION_TTL_MINUTES", 720)?;
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&ttl_minutes) {
            return Err(ConfigError::Invalid {
                key: "SESSION_TTL_MINUTES",
                value: ttl_minutes.to_string(),
            });
        }

        let session = SessionConfig {
            secret: lookup("SESSION_SECRET").filter(|v| !v.is_empty()),
            ttl: Duration::minutes(ttl_minutes),
            cookie_secure: parse_flag(&lookup, "SESSION_COOKIE_SECURE", false)?,
        };

        let static_dir = PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string()));
        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| static_dir.join("img"));
        let allowed_extensions = lookup("ALLOWED_UPLOAD_EXTENSIONS")
            .map(|list| AllowedExtensions::parse_list(&list))
            .unwrap_or_default();

        let uploads = UploadConfig {
            static_dir,
            upload_dir,
            allowed_extensions,
            max_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        };

        let offset_hours: i32 = parse_or(&lookup, "POST_UTC_OFFSET_HOURS", 9)?;
        let post_offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid {
                key: "POST_UTC_OFFSET_HOURS",
                value: offset_hours.to_string(),
            })?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            database,
            run_migrations: parse_flag(&lookup, "RUN_MIGRATIONS", true)?,
            session,
            uploads,
            post_offset,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}
