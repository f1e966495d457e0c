//! Lineup Service Library
//!
//! Serves lineup optimization requests over a newline-delimited JSON stream:
//! inbound messages are parsed, dispatched to the lineup engine and the
//! results published, with a best-effort cache of each user's latest lineup.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub mod cache;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod messages;
pub mod publisher;
pub mod service;
pub mod signals;

pub use cache::{latest_lineup_key, InMemoryLineupCache, LineupCache, RedisLineupCache};
pub use config::{CacheBackend, ServiceConfig};
pub use error::{Result as ServiceResult, ServiceError};
pub use handler::MessageHandler;
pub use logging::initialize_logging_with_config;
pub use messages::{CachedLineup, InboundMessage, OutboundMessage};
pub use publisher::{ChannelPublisher, LinePublisher, ResultPublisher};
pub use service::ServiceState;
pub use signals::shutdown_signal;

/// Environment variable naming an optional configuration file
pub const CONFIG_PATH_ENV: &str = "LINEUP_CONFIG";

/// Load configuration from the file named by `LINEUP_CONFIG` (if any) and
/// environment variables
pub fn load_configuration() -> Result<ServiceConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
    config::load_config(path.as_deref()).context("Failed to load service configuration")
}
