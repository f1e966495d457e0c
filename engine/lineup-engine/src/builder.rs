//! Greedy, budget-constrained lineup builder
//!
//! Slots are filled in two phases:
//!
//! 1. **Locked phase**: the user's locked picks, in the order they were listed,
//!    as long as each still fits the remaining budget and slots. A locked pick
//!    that no longer fits is dropped; earlier picks always win.
//! 2. **Open phase**: repeatedly take the affordable candidate with the best
//!    strategy score plus a budget-pacing bonus, until the roster is full or
//!    nothing affordable remains.
//!
//! Chosen candidates are never swapped out again. A roster with empty slots is
//! a valid result. Each open-phase round scans the remaining candidates once,
//! so a build costs O(slots x pool size).

use crate::config::EngineConfig;
use crate::metrics;
use crate::pool::CandidatePool;
use crate::strategy::StrategyDescriptor;
use crate::types::{Candidate, Lineup, Preferences};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Builds a roster from an adjusted pool snapshot
#[derive(Debug, Clone, Default)]
pub struct LineupBuilder {
    config: EngineConfig,
}

/// Running state of one build
struct Selection {
    picks: Vec<Candidate>,
    remaining_budget: u32,
    remaining_slots: usize,
}

impl Selection {
    fn take(&mut self, candidate: &Candidate) {
        self.remaining_budget -= candidate.salary;
        self.remaining_slots -= 1;
        self.picks.push(candidate.clone());
    }

    fn fits(&self, candidate: &Candidate) -> bool {
        self.remaining_slots > 0 && candidate.salary <= self.remaining_budget
    }
}

impl LineupBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn build(
        &self,
        pool: &CandidatePool,
        preferences: &Preferences,
        strategy: &StrategyDescriptor,
    ) -> Lineup {
        let mut selection = Selection {
            picks: Vec::with_capacity(self.config.roster_size),
            remaining_budget: preferences.budget,
            remaining_slots: self.config.roster_size,
        };

        let dropped = self.fill_locked(pool, preferences, &mut selection);
        let locked_count = selection.picks.len();
        self.fill_open(pool, strategy, &mut selection);

        let metrics = metrics::aggregate(&selection.picks, preferences.budget);

        let mut reasoning: Vec<String> = strategy.reasoning.iter().map(|r| r.to_string()).collect();
        if locked_count > 0 {
            reasoning.push(format!("Kept {locked_count} locked surfer(s) in the lineup"));
        }
        for id in &dropped {
            reasoning.push(format!("Locked surfer {id} could not fit the remaining budget"));
        }
        if selection.picks.len() < self.config.roster_size {
            reasoning.push(format!(
                "Filled {} of {} slots within the {} budget",
                selection.picks.len(),
                self.config.roster_size,
                preferences.budget
            ));
        }

        Lineup {
            id: format!("{}-optimized", strategy.key),
            name: strategy.name.to_string(),
            risk_level: strategy.risk_level,
            candidates: selection.picks,
            total_salary: metrics.total_salary,
            budget_remaining: metrics.budget_remaining,
            projected_points: metrics.projected_points,
            upside: metrics.upside,
            floor: metrics.floor,
            ownership: metrics.ownership,
            diversification: strategy.diversification,
            reasoning,
        }
    }

    /// Place locked picks in listed order, returning the ids that did not fit
    fn fill_locked(
        &self,
        pool: &CandidatePool,
        preferences: &Preferences,
        selection: &mut Selection,
    ) -> Vec<String> {
        let mut placed = HashSet::new();
        let mut dropped = Vec::new();

        for id in &preferences.locked_candidate_ids {
            if placed.contains(id.as_str()) {
                continue;
            }

            let Some(candidate) = pool.get(id) else {
                debug!("Ignoring unknown locked candidate {}", id);
                continue;
            };

            if selection.fits(candidate) {
                selection.take(candidate);
                placed.insert(id.as_str());
            } else {
                warn!(
                    "Dropping locked candidate {} (salary {}, remaining budget {}, slots {})",
                    id, candidate.salary, selection.remaining_budget, selection.remaining_slots
                );
                dropped.push(id.clone());
            }
        }

        dropped
    }

    fn fill_open(
        &self,
        pool: &CandidatePool,
        strategy: &StrategyDescriptor,
        selection: &mut Selection,
    ) {
        let taken: HashSet<&str> = selection.picks.iter().map(|c| c.id.as_str()).collect();
        let candidates = pool.candidates();

        // Indices into the pool, kept in pool order so ties go to the earliest
        let mut remaining: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| !taken.contains(c.id.as_str()) && strategy.admits(c))
            .map(|(idx, _)| idx)
            .collect();

        while selection.remaining_slots > 0 {
            let mut best: Option<(usize, f64)> = None;

            for (position, &idx) in remaining.iter().enumerate() {
                let candidate = &candidates[idx];
                if candidate.salary > selection.remaining_budget {
                    continue;
                }

                let score = strategy.score(candidate) + pacing_bonus(candidate, selection);
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((position, score));
                }
            }

            let Some((position, score)) = best else {
                debug!(
                    "No affordable candidates left with budget {} and {} open slot(s)",
                    selection.remaining_budget, selection.remaining_slots
                );
                break;
            };

            let candidate = &candidates[remaining.remove(position)];
            debug!("Selected {} (salary {}, score {:.3})", candidate.id, candidate.salary, score);
            selection.take(candidate);
        }
    }
}

/// Bonus for candidates cheaper than the per-slot budget share
///
/// Zero for the last slot, so the final pick is made on score alone.
fn pacing_bonus(candidate: &Candidate, selection: &Selection) -> f64 {
    if selection.remaining_slots <= 1 {
        return 0.0;
    }

    let per_slot = selection.remaining_budget as f64 / selection.remaining_slots as f64;
    ((per_slot - candidate.salary as f64) / 1000.0).max(0.0)
}
