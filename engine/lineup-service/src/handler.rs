//! Dispatch of inbound messages
//!
//! All I/O (publishing and the result cache) happens here, around the pure
//! engine call. The optimization itself runs on the blocking pool and always
//! runs to completion; the request timeout only bounds the I/O waits.

use crate::cache::{latest_lineup_key, LineupCache};
use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::messages::{CachedLineup, InboundMessage, OutboundMessage};
use crate::publisher::ResultPublisher;
use lineup_engine::{
    CandidatePatch, InMemoryPoolProvider, Lineup, LineupOptimizer, PoolProvider, Preferences,
    ValidationError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Message sent when an optimization fails for reasons other than validation
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to optimize lineup";

/// Routes inbound messages to the engine and publishes the results
pub struct MessageHandler {
    optimizer: Arc<LineupOptimizer>,
    pool: Arc<InMemoryPoolProvider>,
    publisher: Arc<dyn ResultPublisher>,
    cache: Option<Arc<dyn LineupCache>>,
    cache_ttl: Duration,
    request_timeout: Duration,
}

impl MessageHandler {
    pub fn new(
        config: &ServiceConfig,
        pool: Arc<InMemoryPoolProvider>,
        publisher: Arc<dyn ResultPublisher>,
        cache: Option<Arc<dyn LineupCache>>,
    ) -> Self {
        Self {
            optimizer: Arc::new(LineupOptimizer::new(config.engine.clone())),
            pool,
            publisher,
            cache,
            cache_ttl: config.cache.ttl(),
            request_timeout: config.service.request_timeout(),
        }
    }

    pub fn pool(&self) -> &Arc<InMemoryPoolProvider> {
        &self.pool
    }

    /// Parse and handle one raw JSON message
    ///
    /// Malformed messages are logged and skipped.
    pub async fn handle_raw(&self, raw: &str) {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }

        match serde_json::from_str::<InboundMessage>(raw) {
            Ok(message) => self.handle(message).await,
            Err(e) => match malformed_request_user(raw) {
                Some(user_id) => {
                    warn!("Malformed lineup request from {}: {}", user_id, e);
                    let reply = OutboundMessage::optimization_error(user_id, GENERIC_FAILURE_MESSAGE);
                    if let Err(e) = self.publish(reply).await {
                        error!("Failed to handle optimizeLineup message: {}", e);
                    }
                }
                None => warn!("Skipping malformed message: {}", e),
            },
        }
    }

    /// Handle one message; failures are logged rather than propagated
    pub async fn handle(&self, message: InboundMessage) {
        let kind = message.kind();
        debug!("Handling {} message", kind);

        let result = match message {
            InboundMessage::OptimizeLineup { user_id, preferences } => {
                self.handle_optimize(&user_id, preferences).await
            }
            InboundMessage::SurferUpdate { surfer_id, updates } => {
                self.handle_surfer_update(&surfer_id, &updates).await
            }
            InboundMessage::RefreshRecommendations => self.handle_refresh().await,
        };

        if let Err(e) = result {
            error!("Failed to handle {} message: {}", kind, e);
        }
    }

    async fn handle_optimize(&self, user_id: &str, preferences: Preferences) -> Result<()> {
        info!(
            "Optimizing lineup for {} (budget {}, {} strategy, {} locked)",
            user_id,
            preferences.budget,
            preferences.risk_preference,
            preferences.locked_candidate_ids.len()
        );

        let outcome = match self.run_optimizer(preferences.clone()).await {
            Ok(Ok(lineup)) => Ok(lineup),
            Ok(Err(validation)) => Err(ServiceError::Validation(validation)),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(lineup) => {
                self.cache_lineup(user_id, &lineup, &preferences).await;
                self.publish(OutboundMessage::lineup_optimized(user_id, lineup)).await
            }
            Err(ServiceError::Validation(e)) => {
                info!("Lineup request from {} rejected: {}", user_id, e);
                self.publish(OutboundMessage::optimization_error(user_id, e.to_string())).await
            }
            Err(e) => {
                error!("Lineup optimization for {} failed: {}", user_id, e);
                self.publish(OutboundMessage::optimization_error(user_id, GENERIC_FAILURE_MESSAGE))
                    .await
            }
        }
    }

    /// Run the engine on a snapshot off the async workers
    async fn run_optimizer(
        &self,
        preferences: Preferences,
    ) -> Result<std::result::Result<Lineup, ValidationError>> {
        let optimizer = Arc::clone(&self.optimizer);
        let snapshot = self.pool.current();

        tokio::task::spawn_blocking(move || optimizer.optimize(&snapshot, &preferences))
            .await
            .map_err(|e| ServiceError::Internal(format!("optimizer task failed: {e}")))
    }

    async fn handle_surfer_update(&self, surfer_id: &str, updates: &CandidatePatch) -> Result<()> {
        if updates.is_empty() {
            debug!("Ignoring empty update for {}", surfer_id);
            return Ok(());
        }

        let surfer = self.pool.apply_patch(surfer_id, updates)?;
        info!("Updated surfer {}", surfer_id);
        self.publish(OutboundMessage::surfer_updated(surfer)).await
    }

    async fn handle_refresh(&self) -> Result<()> {
        let recommendations = self.optimizer.recommendations(self.pool.as_ref());
        self.publish(OutboundMessage::recommendations_updated(recommendations)).await
    }

    /// Best-effort write of the user's latest lineup
    async fn cache_lineup(&self, user_id: &str, lineup: &Lineup, preferences: &Preferences) {
        let Some(cache) = &self.cache else {
            return;
        };

        let key = latest_lineup_key(user_id);
        let entry = CachedLineup::new(lineup.clone(), preferences.clone());

        match timeout(self.request_timeout, cache.store(&key, &entry, self.cache_ttl)).await {
            Ok(Ok(())) => debug!("Cached lineup for {}", user_id),
            Ok(Err(e)) => warn!("Failed to cache lineup for {}: {}", user_id, e),
            Err(_) => warn!("Caching lineup for {} timed out", user_id),
        }
    }

    /// Publish once; failures are returned for logging, never retried
    async fn publish(&self, message: OutboundMessage) -> Result<()> {
        match timeout(self.request_timeout, self.publisher.publish(&message)).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(format!("publishing {}", message.kind()))),
        }
    }
}

/// User id of an `optimizeLineup` message whose payload did not parse
fn malformed_request_user(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    if value.get("type")?.as_str()? != "optimizeLineup" {
        return None;
    }
    value.get("userId")?.as_str().map(str::to_string)
}
