//! End-to-end lineup optimization over a pool snapshot

use crate::builder::LineupBuilder;
use crate::conditions;
use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::pool::PoolProvider;
use crate::presets::PresetGenerator;
use crate::strategy::select_strategy;
use crate::types::{Lineup, Preferences};
use crate::validation::RequestValidator;
use std::time::Instant;
use tracing::{info, warn};

/// Runs validate -> adjust -> select strategy -> build -> aggregate
///
/// Every step works on one snapshot taken from the provider, so validation
/// and selection always see the same pool.
#[derive(Debug, Clone, Default)]
pub struct LineupOptimizer {
    config: EngineConfig,
    validator: RequestValidator,
    builder: LineupBuilder,
    presets: PresetGenerator,
}

impl LineupOptimizer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            validator: RequestValidator::new(config.clone()),
            builder: LineupBuilder::new(config.clone()),
            presets: PresetGenerator::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the optimized lineup for one request
    pub fn optimize<P>(&self, provider: &P, preferences: &Preferences) -> Result<Lineup, ValidationError>
    where
        P: PoolProvider + ?Sized,
    {
        let started = Instant::now();
        let snapshot = provider.current();

        if let Err(e) = self.validator.validate(preferences, &snapshot) {
            warn!("Rejected lineup request ({}): {}", e.kind(), e);
            return Err(e);
        }

        let adjusted = conditions::adjust(&snapshot);
        let strategy = select_strategy(preferences.risk_preference);
        let lineup = self.builder.build(&adjusted, preferences, strategy);

        info!(
            "Optimized {} lineup: {} surfers, salary {}/{}, projected {:.1} in {:?}",
            strategy.key,
            lineup.len(),
            lineup.total_salary,
            preferences.budget,
            lineup.projected_points,
            started.elapsed()
        );

        Ok(lineup)
    }

    /// Presets over the current pool with conditions applied
    pub fn recommendations<P>(&self, provider: &P) -> Vec<Lineup>
    where
        P: PoolProvider + ?Sized,
    {
        let adjusted = conditions::adjust(&provider.current());
        let presets = self.presets.generate(&adjusted);
        info!("Generated {} preset lineups from {} surfers", presets.len(), adjusted.len());
        presets
    }
}
