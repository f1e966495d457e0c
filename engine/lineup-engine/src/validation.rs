//! Request validation
//!
//! Rules run in a fixed order and the first failure wins:
//! budget range, locked count, locked affordability.

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::pool::CandidatePool;
use crate::types::Preferences;
use std::collections::HashSet;

/// Validates preferences against the engine limits and a pool snapshot
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    config: EngineConfig,
}

impl RequestValidator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn validate(
        &self,
        preferences: &Preferences,
        pool: &CandidatePool,
    ) -> Result<(), ValidationError> {
        if !self.config.budget_in_range(preferences.budget) {
            return Err(ValidationError::BudgetOutOfRange {
                budget: preferences.budget,
                min: self.config.min_budget,
                max: self.config.max_budget,
            });
        }

        let locked_count = distinct_locked(preferences).count();
        if locked_count > self.config.roster_size {
            return Err(ValidationError::TooManyLocked {
                count: locked_count,
                max: self.config.roster_size,
            });
        }

        let locked_salary = locked_salary(preferences, pool);
        if locked_salary > preferences.budget as u64 {
            return Err(ValidationError::LockedSelectionOverBudget {
                locked_salary,
                budget: preferences.budget,
            });
        }

        Ok(())
    }
}

/// Combined salary of the locked ids present in the pool
///
/// Unknown ids are ignored and a repeated id is counted once.
pub fn locked_salary(preferences: &Preferences, pool: &CandidatePool) -> u64 {
    distinct_locked(preferences)
        .filter_map(|id| pool.get(id))
        .map(|c| c.salary as u64)
        .sum()
}

/// Locked ids in listed order with repeats removed
fn distinct_locked(preferences: &Preferences) -> impl Iterator<Item = &str> {
    let mut seen = HashSet::new();
    preferences
        .locked_candidate_ids
        .iter()
        .map(String::as_str)
        .filter(move |id| seen.insert(*id))
}
