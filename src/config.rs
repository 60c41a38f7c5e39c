//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Redis
//!
//! Either a full URL:
//!
//! ```bash
//! export REDIS_URL="redis://:secret@localhost:6379/0"
//! ```
//!
//! or individual components:
//!
//! ```bash
//! export REDIS_ADDR="127.0.0.1:6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! `REDIS_URL` wins when both are set. Without either, the components' defaults
//! point at a local server.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `BASE_URL` - Prefix for returned short URLs (default: `http://localhost:8080`)
//! - `STORE_BACKEND` - `redis` or `memory` (default: `redis`)
//! - `REDIS_POOL_SIZE` - Connections to open (default: 50)
//! - `REDIS_TIMEOUT_MS` - Connect and command timeout (default: 10000)
//! - `RATE_LIMIT_PER_DAY` - Submissions per client per day (default: 100)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::DEFAULT_DAILY_LIMIT;

const DEFAULT_REDIS_ADDR: &str = "127.0.0.1:6379";
const DEFAULT_POOL_SIZE: usize = 50;
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const MAX_POOL_SIZE: usize = 1024;

/// Key-value backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("STORE_BACKEND must be 'redis' or 'memory', got '{}'", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    pub store_backend: StoreBackend,
    pub redis_url: String,
    pub redis_pool_size: usize,
    pub redis_timeout_ms: u64,
    /// Submissions allowed per client IP in a sliding 24h window.
    pub rate_limit_per_day: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or the backend name
    /// is unknown.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => StoreBackend::Redis,
        };

        let redis_url = Self::load_redis_url();

        let redis_pool_size = parse_var("REDIS_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        let redis_timeout_ms = parse_var("REDIS_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
        let rate_limit_per_day = parse_var("RATE_LIMIT_PER_DAY", DEFAULT_DAILY_LIMIT)?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            base_url,
            store_backend,
            redis_url,
            redis_pool_size,
            redis_timeout_ms,
            rate_limit_per_day,
            log_level,
            log_format,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_ADDR`, `REDIS_PASSWORD`, `REDIS_DB`
    fn load_redis_url() -> String {
        if let Ok(url) = env::var("REDIS_URL") {
            return url;
        }

        let addr = env::var("REDIS_ADDR").unwrap_or_else(|_| DEFAULT_REDIS_ADDR.to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        match env::var("REDIS_PASSWORD") {
            Ok(pwd) if !pwd.is_empty() => format!("redis://:{}@{}/{}", pwd, addr, db),
            _ => format!("redis://{}/{}", addr, db),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not http(s)
    /// - `redis_url` is not `redis://` or `rediss://` while Redis is selected
    /// - pool size, timeout or daily limit is out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.store_backend == StoreBackend::Redis
            && !self.redis_url.starts_with("redis://")
            && !self.redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(&self.redis_url)
            );
        }

        if self.redis_pool_size == 0 || self.redis_pool_size > MAX_POOL_SIZE {
            anyhow::bail!(
                "REDIS_POOL_SIZE must be between 1 and {}, got {}",
                MAX_POOL_SIZE,
                self.redis_pool_size
            );
        }

        if self.redis_timeout_ms == 0 {
            anyhow::bail!("REDIS_TIMEOUT_MS must be greater than 0");
        }

        if self.rate_limit_per_day == 0 {
            anyhow::bail!("RATE_LIMIT_PER_DAY must be greater than 0");
        }

        Ok(())
    }

    pub fn redis_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_timeout_ms)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Store backend: {}", self.store_backend);

        if self.store_backend == StoreBackend::Redis {
            tracing::info!("  Redis: {}", mask_connection_string(&self.redis_url));
            tracing::info!(
                "  Redis pool: {} connections, {}ms timeout",
                self.redis_pool_size,
                self.redis_timeout_ms
            );
        }

        tracing::info!("  Daily limit per client: {}", self.rate_limit_per_day);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

/// Masks the password in connection strings for logging.
///
/// `redis://:password@host:port/db` becomes `redis://:***@host:port/db`.
pub fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.rfind('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.find(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// Expects `.env` to be already loaded (e.g., via `dotenvy::dotenv()` in `main.rs`).
///
/// # Errors
///
/// Returns an error if a variable does not parse or validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
