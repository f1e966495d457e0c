//! Error types for the lineup service

use lineup_engine::{PoolError, ValidationError};
use thiserror::Error;

/// Result type for lineup service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while serving lineup messages
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create a new cache error
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<redis::RedisError> for ServiceError {
    fn from(err: redis::RedisError) -> Self {
        ServiceError::Cache(err.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

impl From<::config::ConfigError> for ServiceError {
    fn from(err: ::config::ConfigError) -> Self {
        ServiceError::Configuration(err.to_string())
    }
}
