//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// Default values used when a variable is not set.
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 3000;
    pub const STATIC_DIR: &str = "public";

    pub const DB_HOST: &str = "localhost";
    pub const DB_USER: &str = "root";
    pub const DB_PASS: &str = "";
    pub const DB_NAME: &str = "api";
    pub const DB_PORT: u16 = 3307;
    pub const DB_POOL_SIZE: u32 = 10;
    pub const DB_RETRY_ATTEMPTS: u32 = 10;
    pub const DB_RETRY_DELAY_MS: u64 = 1000;
}

/// MySQL connection and startup retry settings.
#[derive(Debug)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Never logged; only exposed when building connection URLs.
    pub password: SecretString,
    /// Database (schema) name, created on startup if missing
    pub name: String,
    /// Maximum pooled connections
    pub pool_size: u32,
    /// Maximum initialization attempts before giving up
    pub retry_attempts: u32,
    /// Fixed delay between initialization attempts
    pub retry_delay: Duration,
}

impl DatabaseSettings {
    /// URL of the server itself, with no database selected.
    pub fn server_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(self.password.expose_secret()),
            self.host,
            self.port
        )
    }

    /// URL scoped to the configured database.
    pub fn database_url(&self) -> String {
        format!("{}/{}", self.server_url(), self.name)
    }
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    /// Listen address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Directory served at `/` when it exists
    pub static_dir: PathBuf,
    /// Number of HTTP worker threads
    pub workers: usize,
    pub database: DatabaseSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables (all optional):
    /// - `HOST`: listen address (default: 0.0.0.0)
    /// - `PORT`: listen port (default: 3000)
    /// - `STATIC_DIR`: static files directory (default: public)
    /// - `WORKERS`: HTTP worker threads (default: number of CPUs)
    /// - `DB_HOST`, `DB_USER`, `DB_PASS`, `DB_NAME`, `DB_PORT`
    /// - `DB_POOL_SIZE`: max pooled connections (default: 10)
    /// - `DB_RETRY_ATTEMPTS`: max startup attempts (default: 10)
    /// - `DB_RETRY_DELAY`: delay between attempts in ms (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var_or("HOST", defaults::HOST);
        let port = parse_var(&lookup, "PORT", defaults::PORT)?;
        let static_dir = PathBuf::from(var_or("STATIC_DIR", defaults::STATIC_DIR));
        let workers = parse_var(&lookup, "WORKERS", num_cpus::get())?;
        if workers == 0 {
            return Err(ConfigError::InvalidValue("WORKERS must be at least 1"));
        }

        let name = var_or("DB_NAME", defaults::DB_NAME);
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        {
            return Err(ConfigError::InvalidValue(
                "DB_NAME may only contain letters, digits, '_' and '$'",
            ));
        }

        let database = DatabaseSettings {
            host: var_or("DB_HOST", defaults::DB_HOST),
            port: parse_var(&lookup, "DB_PORT", defaults::DB_PORT)?,
            user: var_or("DB_USER", defaults::DB_USER),
            password: SecretString::from(var_or("DB_PASS", defaults::DB_PASS)),
            name,
            pool_size: parse_var(&lookup, "DB_POOL_SIZE", defaults::DB_POOL_SIZE)?,
            retry_attempts: parse_var(&lookup, "DB_RETRY_ATTEMPTS", defaults::DB_RETRY_ATTEMPTS)?,
            retry_delay: Duration::from_millis(parse_var(
                &lookup,
                "DB_RETRY_DELAY",
                defaults::DB_RETRY_DELAY_MS,
            )?),
        };

        if database.pool_size == 0 {
            return Err(ConfigError::InvalidValue("DB_POOL_SIZE must be at least 1"));
        }

        Ok(Config {
            host,
            port,
            static_dir,
            workers,
            database,
        })
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("{key} must be a valid number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}
