//! Risk strategies
//!
//! Each [`RiskPreference`] maps to exactly one static [`StrategyDescriptor`]:
//! a pre-filter, a score function and the metadata reported on the lineup.
//! The builder only talks to the descriptor, never to the preference.

use crate::types::{Candidate, RiskLevel, RiskPreference};

/// Which candidates a strategy is willing to consider in the open phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefilter {
    /// Every candidate is eligible
    Any,
    /// Only candidates whose risk level is listed
    RiskLevels(&'static [RiskLevel]),
}

impl Prefilter {
    pub fn admits(&self, candidate: &Candidate) -> bool {
        match self {
            Prefilter::Any => true,
            Prefilter::RiskLevels(levels) => levels.contains(&candidate.risk_level),
        }
    }
}

/// Scoring and metadata for one risk strategy
#[derive(Debug, Clone, Copy)]
pub struct StrategyDescriptor {
    pub preference: RiskPreference,

    /// Stable key used in lineup ids (e.g., "balanced")
    pub key: &'static str,

    /// Lineup display name
    pub name: &'static str,

    /// Risk level reported on the lineup
    pub risk_level: RiskLevel,

    pub prefilter: Prefilter,

    /// Diversification score reported on the lineup
    pub diversification: u32,

    pub reasoning: &'static [&'static str],

    score: fn(&Candidate) -> f64,
}

impl StrategyDescriptor {
    /// Strategy score of a candidate, before any budget bonus
    pub fn score(&self, candidate: &Candidate) -> f64 {
        (self.score)(candidate)
    }

    pub fn admits(&self, candidate: &Candidate) -> bool {
        self.prefilter.admits(candidate)
    }
}

fn conservative_score(candidate: &Candidate) -> f64 {
    candidate.downside + candidate.expected_value
}

fn balanced_score(candidate: &Candidate) -> f64 {
    candidate.expected_value + 0.3 * (candidate.upside - candidate.downside)
}

fn aggressive_score(candidate: &Candidate) -> f64 {
    candidate.upside + 0.5 * candidate.expected_value
}

static CONSERVATIVE: StrategyDescriptor = StrategyDescriptor {
    preference: RiskPreference::Conservative,
    key: "conservative",
    name: "Conservative Optimized Lineup",
    risk_level: RiskLevel::Low,
    prefilter: Prefilter::RiskLevels(&[RiskLevel::Low, RiskLevel::Medium]),
    diversification: 85,
    reasoning: &[
        "Prioritized surfers with high floors and reliable value",
        "Excluded high and extreme risk surfers from open slots",
        "Built for steady scoring across heats",
    ],
    score: conservative_score,
};

static BALANCED: StrategyDescriptor = StrategyDescriptor {
    preference: RiskPreference::Balanced,
    key: "balanced",
    name: "Balanced Optimized Lineup",
    risk_level: RiskLevel::Medium,
    prefilter: Prefilter::Any,
    diversification: 65,
    reasoning: &[
        "Weighted value per salary against each surfer's scoring range",
        "Mixed reliable scorers with upside plays",
    ],
    score: balanced_score,
};

static AGGRESSIVE: StrategyDescriptor = StrategyDescriptor {
    preference: RiskPreference::Aggressive,
    key: "aggressive",
    name: "Aggressive Optimized Lineup",
    risk_level: RiskLevel::High,
    prefilter: Prefilter::Any,
    diversification: 45,
    reasoning: &[
        "Chased ceiling scores over safe floors",
        "Accepted volatile surfers for tournament-winning upside",
    ],
    score: aggressive_score,
};

/// Strategy descriptor for a risk preference
pub fn select_strategy(preference: RiskPreference) -> &'static StrategyDescriptor {
    match preference {
        RiskPreference::Conservative => &CONSERVATIVE,
        RiskPreference::Balanced => &BALANCED,
        RiskPreference::Aggressive => &AGGRESSIVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Candidate {
        Candidate {
            upside: 90.0,
            downside: 40.0,
            expected_value: 6.0,
            ..Candidate::new("sample", "Sample", 10_000, RiskLevel::High, 60.0)
        }
    }

    #[test]
    fn test_scores() {
        let candidate = sample();

        let conservative = select_strategy(RiskPreference::Conservative);
        assert_eq!(conservative.score(&candidate), 46.0);

        let balanced = select_strategy(RiskPreference::Balanced);
        assert!((balanced.score(&candidate) - 21.0).abs() < 1e-9);

        let aggressive = select_strategy(RiskPreference::Aggressive);
        assert_eq!(aggressive.score(&candidate), 93.0);
    }

    #[test]
    fn test_prefilters() {
        let mut candidate = sample();
        let conservative = select_strategy(RiskPreference::Conservative);

        assert!(!conservative.admits(&candidate));
        candidate.risk_level = RiskLevel::Medium;
        assert!(conservative.admits(&candidate));
        candidate.risk_level = RiskLevel::Extreme;
        assert!(!conservative.admits(&candidate));

        assert!(select_strategy(RiskPreference::Balanced).admits(&candidate));
        assert!(select_strategy(RiskPreference::Aggressive).admits(&candidate));
    }

    #[test]
    fn test_metadata() {
        assert_eq!(select_strategy(RiskPreference::Conservative).diversification, 85);
        assert_eq!(select_strategy(RiskPreference::Balanced).diversification, 65);
        assert_eq!(select_strategy(RiskPreference::Aggressive).diversification, 45);

        let unknown = select_strategy(RiskPreference::from_input("whatever"));
        assert_eq!(unknown.preference, RiskPreference::Balanced);
        assert!(!unknown.reasoning.is_empty());
    }
}
