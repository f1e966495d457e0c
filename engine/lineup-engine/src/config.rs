//! Configuration for the lineup engine

use crate::{
    DEFAULT_MAX_BUDGET, DEFAULT_MIN_BUDGET, DEFAULT_PRESET_REFERENCE_BUDGET, DEFAULT_ROSTER_SIZE,
};
use serde::{Deserialize, Serialize};

/// Limits applied by the validator, builder and preset generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Smallest accepted budget (inclusive)
    pub min_budget: u32,

    /// Largest accepted budget (inclusive)
    pub max_budget: u32,

    /// Roster slots per lineup, also the cap on locked picks
    pub roster_size: usize,

    /// Salary cap used to report preset budget usage
    pub preset_reference_budget: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_budget: DEFAULT_MIN_BUDGET,
            max_budget: DEFAULT_MAX_BUDGET,
            roster_size: DEFAULT_ROSTER_SIZE,
            preset_reference_budget: DEFAULT_PRESET_REFERENCE_BUDGET,
        }
    }
}

impl EngineConfig {
    /// Check that the limits are internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.min_budget > self.max_budget {
            return Err(format!(
                "min_budget {} is greater than max_budget {}",
                self.min_budget, self.max_budget
            ));
        }

        if self.roster_size == 0 {
            return Err("roster_size must be at least 1".to_string());
        }

        Ok(())
    }

    /// Whether a budget falls inside the accepted range
    pub fn budget_in_range(&self, budget: u32) -> bool {
        (self.min_budget..=self.max_budget).contains(&budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.min_budget, 30_000);
        assert_eq!(config.max_budget, 60_000);
        assert_eq!(config.roster_size, 6);
        assert_eq!(config.preset_reference_budget, 50_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_budget_range_is_inclusive() {
        let config = EngineConfig::default();
        assert!(config.budget_in_range(30_000));
        assert!(config.budget_in_range(60_000));
        assert!(!config.budget_in_range(29_999));
        assert!(!config.budget_in_range(60_001));
    }

    #[test]
    fn test_invalid_config() {
        let config = EngineConfig { min_budget: 70_000, ..Default::default() };
        assert!(config.validate().is_err());

        let config = EngineConfig { roster_size: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"roster_size": 5}"#).unwrap();
        assert_eq!(config.roster_size, 5);
        assert_eq!(config.min_budget, 30_000);
    }
}
