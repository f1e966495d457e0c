//! Service state and the message loop

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::cache::{InMemoryLineupCache, LineupCache, RedisLineupCache};
use crate::config::{CacheBackend, CacheSettings, ServiceConfig};
use crate::handler::MessageHandler;
use crate::publisher::ResultPublisher;
use lineup_engine::{seed, CandidatePool, InMemoryPoolProvider};

/// Service state containing all initialized components
pub struct ServiceState {
    /// Service configuration
    pub config: ServiceConfig,

    /// Canonical candidate pool
    pub pool: Arc<InMemoryPoolProvider>,

    /// Inbound message dispatcher
    pub handler: Arc<MessageHandler>,
}

impl ServiceState {
    /// Create the service state, loading the pool and connecting the cache
    pub async fn new(config: ServiceConfig, publisher: Arc<dyn ResultPublisher>) -> Result<Self> {
        info!("Initializing lineup service components...");

        let pool = load_pool(&config).await.context("Failed to load candidate pool")?;
        info!("Candidate pool loaded ({} surfers)", pool.len());
        let pool = Arc::new(InMemoryPoolProvider::new(pool));

        let cache = build_cache(&config.cache).await;
        let handler = Arc::new(MessageHandler::new(&config, pool.clone(), publisher, cache));

        Ok(Self { config, pool, handler })
    }

    /// Read newline-delimited JSON messages until the input closes or
    /// `shutdown` resolves
    ///
    /// Messages are handled one at a time in arrival order, so a surfer update
    /// is visible to every request read after it. A message already being
    /// handled when shutdown fires runs to completion. Returns the number of
    /// lines handled.
    pub async fn serve<R, S>(&self, reader: R, shutdown: S) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        let mut lines = reader.lines();
        let mut handled = 0usize;
        tokio::pin!(shutdown);

        info!("Lineup service is accepting messages");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested; stopping message loop");
                    break;
                }
                line = lines.next_line() => {
                    match line.context("Failed to read inbound message")? {
                        Some(line) => {
                            self.handler.handle_raw(&line).await;
                            handled += 1;
                        }
                        None => {
                            info!("Inbound stream closed");
                            break;
                        }
                    }
                }
            }
        }

        debug!("Message loop finished after {} lines", handled);
        Ok(handled)
    }
}

/// Pool from the configured file, or the built-in roster
async fn load_pool(config: &ServiceConfig) -> Result<CandidatePool> {
    match &config.service.pool_file {
        Some(path) => {
            info!("Loading candidate pool from {}", path.display());
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read pool file {}", path.display()))?;
            Ok(CandidatePool::from_json(&raw)?)
        }
        None => {
            info!("No pool file configured; using the built-in roster");
            Ok(seed::default_pool())
        }
    }
}

/// Result cache for the configured backend
///
/// The cache is best effort: an unreachable Redis leaves the service running
/// without one.
async fn build_cache(settings: &CacheSettings) -> Option<Arc<dyn LineupCache>> {
    match settings.backend {
        CacheBackend::Disabled => {
            info!("Result cache disabled");
            None
        }
        CacheBackend::Memory => {
            let cache = InMemoryLineupCache::new();
            spawn_expiry_sweep(cache.clone(), settings);
            info!("Using in-memory result cache (TTL {}s)", settings.ttl_secs);
            Some(Arc::new(cache))
        }
        CacheBackend::Redis => match RedisLineupCache::connect(&settings.redis_url).await {
            Ok(cache) => Some(Arc::new(cache)),
            Err(e) => {
                warn!("Redis cache unavailable, continuing without a result cache: {}", e);
                None
            }
        },
    }
}

fn spawn_expiry_sweep(cache: InMemoryLineupCache, settings: &CacheSettings) {
    let period = settings.ttl().max(std::time::Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            cache.clear_expired().await;
        }
    });
}
