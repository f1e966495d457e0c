//! Service configuration management
//!
//! Defaults, then an optional TOML file, then `LINEUP_*` environment overrides.

use crate::error::{Result, ServiceError};
use lineup_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Engine limits
    pub engine: EngineConfig,

    /// Result cache configuration
    pub cache: CacheSettings,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Service-level settings
    pub service: ServiceSettings,
}

/// Which cache backend holds the latest lineups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Disabled,
    Memory,
    Redis,
}

impl std::str::FromStr for CacheBackend {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "disabled" | "none" | "off" => Ok(CacheBackend::Disabled),
            "memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            other => Err(ServiceError::configuration(format!("Invalid cache backend: {other}"))),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub backend: CacheBackend,

    /// Redis connection URL, used by the redis backend
    pub redis_url: String,

    /// TTL of a cached lineup in seconds
    pub ttl_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// JSON file with the candidate pool; the built-in roster when unset
    pub pool_file: Option<PathBuf>,

    /// How long to wait on publish and cache I/O before giving up
    pub request_timeout_ms: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            ttl_secs: 300, // 5 minutes
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { pool_file: None, request_timeout_ms: 10_000 }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl ServiceSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Load configuration from an optional file and the environment
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => {
            tracing::debug!("Loading configuration from file: {:?}", path);
            load_from_file(path)?
        }
        None => ServiceConfig::default(),
    };

    // Override with environment variables
    load_from_env(&mut config)?;

    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a TOML (or any format the config crate knows) file
pub fn load_from_file(path: &Path) -> Result<ServiceConfig> {
    if !path.exists() {
        return Err(ServiceError::configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let settings = ::config::Config::builder().add_source(::config::File::from(path)).build()?;
    Ok(settings.try_deserialize()?)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ServiceError::configuration(format!("Invalid value for {name}: {value}")))
}

/// Load configuration from environment variables
fn load_from_env(config: &mut ServiceConfig) -> Result<()> {
    if let Ok(level) = std::env::var("LINEUP_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Ok(format) = std::env::var("LINEUP_LOG_FORMAT") {
        config.logging.format = format;
    }

    if let Ok(backend) = std::env::var("LINEUP_CACHE_BACKEND") {
        config.cache.backend = backend.parse()?;
    }

    if let Ok(url) = std::env::var("LINEUP_REDIS_URL") {
        config.cache.redis_url = url;
    }

    if let Ok(ttl) = std::env::var("LINEUP_CACHE_TTL_SECS") {
        config.cache.ttl_secs = parse_env("LINEUP_CACHE_TTL_SECS", &ttl)?;
    }

    if let Ok(pool_file) = std::env::var("LINEUP_POOL_FILE") {
        config.service.pool_file = Some(PathBuf::from(pool_file));
    }

    if let Ok(timeout) = std::env::var("LINEUP_REQUEST_TIMEOUT_MS") {
        config.service.request_timeout_ms = parse_env("LINEUP_REQUEST_TIMEOUT_MS", &timeout)?;
    }

    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    config.engine.validate().map_err(ServiceError::configuration)?;

    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => {
            return Err(ServiceError::configuration(format!(
                "Invalid log level: {}",
                config.logging.level
            )))
        }
    }

    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => {
            return Err(ServiceError::configuration(format!(
                "Invalid log format: {}",
                config.logging.format
            )))
        }
    }

    if config.service.request_timeout_ms == 0 {
        return Err(ServiceError::configuration("request_timeout_ms must be positive"));
    }

    if let Some(pool_file) = &config.service.pool_file {
        if !pool_file.exists() {
            return Err(ServiceError::configuration(format!(
                "Pool file not found: {}",
                pool_file.display()
            )));
        }
    }

    Ok(())
}
