//! Preset recommendations
//!
//! Three fixed-size presets built from the whole pool, independent of any
//! user's budget or locks. Budget usage is reported against the reference cap
//! after selection and never gates it.

use crate::config::EngineConfig;
use crate::metrics;
use crate::pool::CandidatePool;
use crate::types::{Candidate, Lineup, RiskLevel};
use tracing::debug;

/// Generates the momentum, value and consensus presets
#[derive(Debug, Clone, Default)]
pub struct PresetGenerator {
    config: EngineConfig,
}

impl PresetGenerator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// All presets in display order: momentum, value, consensus
    pub fn generate(&self, pool: &CandidatePool) -> Vec<Lineup> {
        vec![self.momentum(pool), self.value(pool), self.consensus(pool)]
    }

    /// Surfers in form, hottest first
    pub fn momentum(&self, pool: &CandidatePool) -> Lineup {
        let mut picks: Vec<&Candidate> = pool.iter().filter(|c| c.form_adjustment > 0.0).collect();
        picks.sort_by(|a, b| b.form_adjustment.total_cmp(&a.form_adjustment));

        self.assemble(
            "momentum",
            "Momentum Play",
            RiskLevel::High,
            70,
            &[
                "Rode surfers with the strongest recent form",
                "Favors hot streaks over season-long averages",
            ],
            picks,
        )
    }

    /// Best points per salary
    pub fn value(&self, pool: &CandidatePool) -> Lineup {
        let mut picks: Vec<&Candidate> = pool.iter().collect();
        picks.sort_by(|a, b| b.expected_value.total_cmp(&a.expected_value));

        self.assemble(
            "value",
            "Value Hunter",
            RiskLevel::Low,
            85,
            &[
                "Maximized projected points per salary dollar",
                "Leaves room under the cap for late swaps",
            ],
            picks,
        )
    }

    /// Highest projected scorers
    pub fn consensus(&self, pool: &CandidatePool) -> Lineup {
        let mut picks: Vec<&Candidate> = pool.iter().collect();
        picks.sort_by(|a, b| b.projected_points.total_cmp(&a.projected_points));

        self.assemble(
            "consensus",
            "Consensus Favorites",
            RiskLevel::Medium,
            60,
            &[
                "Stacked the highest projected scorers",
                "Mirrors the most popular lineups in the contest",
            ],
            picks,
        )
    }

    fn assemble(
        &self,
        id: &str,
        name: &str,
        risk_level: RiskLevel,
        diversification: u32,
        reasoning: &[&str],
        mut picks: Vec<&Candidate>,
    ) -> Lineup {
        picks.truncate(self.config.roster_size);
        let candidates: Vec<Candidate> = picks.into_iter().cloned().collect();

        let reference = self.config.preset_reference_budget;
        let metrics = metrics::aggregate(&candidates, reference);

        let mut reasoning: Vec<String> = reasoning.iter().map(|r| r.to_string()).collect();
        if metrics.budget_remaining < 0 {
            reasoning.push(format!(
                "Runs {} over the {} reference salary cap",
                -metrics.budget_remaining, reference
            ));
        }

        debug!(
            "Built {} preset with {} surfers (salary {})",
            id,
            candidates.len(),
            metrics.total_salary
        );

        Lineup {
            id: id.to_string(),
            name: name.to_string(),
            risk_level,
            candidates,
            total_salary: metrics.total_salary,
            budget_remaining: metrics.budget_remaining,
            projected_points: metrics.projected_points,
            upside: metrics.upside,
            floor: metrics.floor,
            ownership: metrics.ownership,
            diversification,
            reasoning,
        }
    }
}
