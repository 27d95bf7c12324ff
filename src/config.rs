//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Configuration Methods
//!
//! ### Method 1: Full URL (simpler for local development)
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! ### Method 2: Individual components (recommended for production)
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! If `REDIS_URL` is not set, it is constructed from the components.
//!
//! ## Required Variables
//!
//! Either `REDIS_URL` or `REDIS_HOST`, unless `MEMORY_STORE=true`.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public base for generated short URLs
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Trust forwarding headers for client identity
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: none)
//! - `RATE_LIMIT_MAX_REQUESTS` - Window quota (default: 15)
//! - `RATE_LIMIT_WINDOW_SECS` - Window length (default: 120)
//! - `URL_TTL_DAYS` - Mapping lifetime, slid on access (default: 30)
//! - `MEMORY_STORE` - Run on the in-process store, no Redis needed

use anyhow::Result;
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For /
    /// X-Real-IP headers. Enable only behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub allowed_origins: Vec<String>,
    /// Maximum accepted shorten requests per client per window.
    pub rate_limit_max_requests: u32,
    /// Sliding window length in seconds.
    pub rate_limit_window_secs: u64,
    /// Mapping TTL in days, refreshed (extended, never shortened) on every
    /// dedup hit or resolve.
    pub url_ttl_days: u64,
    /// Run on the in-process store instead of Redis.
    pub use_memory_store: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let rate_limit_max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        let rate_limit_window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        let url_ttl_days = env::var("URL_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let use_memory_store = env::var("MEMORY_STORE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            redis_url,
            listen_addr,
            base_url,
            log_level,
            log_format,
            behind_proxy,
            allowed_origins,
            rate_limit_max_requests,
            rate_limit_window_secs,
            url_ttl_days,
            use_memory_store,
        })
    }

    /// Loads the Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`,
    ///    `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            // Empty password means no authentication
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither Redis is configured nor `MEMORY_STORE` enabled
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - The Redis URL has an unexpected scheme
    /// - A rate-limit or TTL knob is zero
    pub fn validate(&self) -> Result<()> {
        if self.redis_url.is_none() && !self.use_memory_store {
            anyhow::bail!("REDIS_URL (or REDIS_HOST) must be set unless MEMORY_STORE=true");
        }

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

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                redis_url
            );
        }

        if self.rate_limit_max_requests == 0 {
            anyhow::bail!("RATE_LIMIT_MAX_REQUESTS must be at least 1");
        }

        if self.rate_limit_window_secs == 0 {
            anyhow::bail!("RATE_LIMIT_WINDOW_SECS must be at least 1");
        }

        if self.url_ttl_days == 0 {
            anyhow::bail!("URL_TTL_DAYS must be at least 1");
        }

        Ok(())
    }
}
