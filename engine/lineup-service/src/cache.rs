//! Best-effort result cache
//!
//! The latest lineup per user is stored under `lineup_{userId}_latest` with a
//! short TTL. Expiry belongs to the backing store; callers only write and read.

use crate::error::{Result, ServiceError};
use crate::messages::CachedLineup;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Cache key for a user's latest lineup
pub fn latest_lineup_key(user_id: &str) -> String {
    format!("lineup_{user_id}_latest")
}

/// Key-value store for cached lineups
#[async_trait]
pub trait LineupCache: Send + Sync {
    async fn store(&self, key: &str, entry: &CachedLineup, ttl: Duration) -> Result<()>;

    async fn fetch(&self, key: &str) -> Result<Option<CachedLineup>>;
}

#[derive(Debug, Clone)]
struct CachedEntry {
    entry: CachedLineup,
    cached_at: DateTime<Utc>,
    ttl: Duration,
}

impl CachedEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = (now - self.cached_at).to_std().unwrap_or_default();
        age >= self.ttl
    }
}

/// In-process cache with per-entry TTL
#[derive(Debug, Clone, Default)]
pub struct InMemoryLineupCache {
    entries: Arc<RwLock<HashMap<String, CachedEntry>>>,
}

impl InMemoryLineupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry
    pub async fn clear_expired(&self) {
        let mut entries = self.entries.write().await;
        let now = Utc::now();

        let initial_size = entries.len();
        entries.retain(|_, cached| !cached.is_expired(now));

        let removed = initial_size - entries.len();
        if removed > 0 {
            info!("Cleared {} expired lineup cache entries", removed);
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl LineupCache for InMemoryLineupCache {
    async fn store(&self, key: &str, entry: &CachedLineup, ttl: Duration) -> Result<()> {
        let cached = CachedEntry { entry: entry.clone(), cached_at: Utc::now(), ttl };
        self.entries.write().await.insert(key.to_string(), cached);
        debug!("Cached lineup under {} for {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<CachedLineup>> {
        let entries = self.entries.read().await;
        let Some(cached) = entries.get(key) else {
            debug!("Cache miss for key: {}", key);
            return Ok(None);
        };

        if cached.is_expired(Utc::now()) {
            debug!("Cache entry {} expired", key);
            return Ok(None);
        }

        Ok(Some(cached.entry.clone()))
    }
}

/// Redis-backed cache; Redis owns expiry through SETEX
#[derive(Clone)]
pub struct RedisLineupCache {
    connection_manager: ConnectionManager,
}

impl RedisLineupCache {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)?;
        let connection_manager = ConnectionManager::new(client).await?;
        info!("Connected lineup cache to {}", redis_url);
        Ok(Self { connection_manager })
    }
}

#[async_trait]
impl LineupCache for RedisLineupCache {
    async fn store(&self, key: &str, entry: &CachedLineup, ttl: Duration) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let serialized = serde_json::to_string(entry)?;

        let _: () = conn.set_ex(key, serialized, ttl.as_secs()).await?;
        debug!("Cached lineup under {} with TTL: {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<CachedLineup>> {
        let mut conn = self.connection_manager.clone();
        let raw: Option<String> = conn.get(key).await?;

        match raw {
            Some(data) => {
                let entry = serde_json::from_str(&data)
                    .map_err(|e| ServiceError::cache(format!("corrupt entry {key}: {e}")))?;
                debug!("Cache hit for key: {}", key);
                Ok(Some(entry))
            }
            None => {
                debug!("Cache miss for key: {}", key);
                Ok(None)
            }
        }
    }
}
