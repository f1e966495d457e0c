//! Message types exchanged with the pub/sub transport
//!
//! Every message is a JSON object tagged by its `type` field.

use chrono::Utc;
use lineup_engine::{Candidate, CandidatePatch, Lineup, Preferences};
use serde::{Deserialize, Serialize};

/// Messages the service consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    /// Build a lineup for one user
    OptimizeLineup {
        #[serde(rename = "userId")]
        user_id: String,
        preferences: Preferences,
    },

    /// Merge a partial update into one surfer for future requests
    SurferUpdate {
        #[serde(rename = "surferId")]
        surfer_id: String,
        #[serde(default)]
        updates: CandidatePatch,
    },

    /// Regenerate the preset lineups
    RefreshRecommendations,
}

impl InboundMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::OptimizeLineup { .. } => "optimizeLineup",
            InboundMessage::SurferUpdate { .. } => "surferUpdate",
            InboundMessage::RefreshRecommendations => "refreshRecommendations",
        }
    }
}

/// Messages the service publishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    LineupOptimized {
        #[serde(rename = "userId")]
        user_id: String,
        lineup: Lineup,
        timestamp: i64,
    },

    OptimizationError {
        #[serde(rename = "userId")]
        user_id: String,
        message: String,
        timestamp: i64,
    },

    RecommendationsUpdated {
        recommendations: Vec<Lineup>,
        timestamp: i64,
    },

    SurferUpdated {
        surfer: Candidate,
        timestamp: i64,
    },
}

impl OutboundMessage {
    pub fn lineup_optimized(user_id: impl Into<String>, lineup: Lineup) -> Self {
        Self::LineupOptimized { user_id: user_id.into(), lineup, timestamp: now_millis() }
    }

    pub fn optimization_error(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OptimizationError {
            user_id: user_id.into(),
            message: message.into(),
            timestamp: now_millis(),
        }
    }

    pub fn recommendations_updated(recommendations: Vec<Lineup>) -> Self {
        Self::RecommendationsUpdated { recommendations, timestamp: now_millis() }
    }

    pub fn surfer_updated(surfer: Candidate) -> Self {
        Self::SurferUpdated { surfer, timestamp: now_millis() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::LineupOptimized { .. } => "lineupOptimized",
            OutboundMessage::OptimizationError { .. } => "optimizationError",
            OutboundMessage::RecommendationsUpdated { .. } => "recommendationsUpdated",
            OutboundMessage::SurferUpdated { .. } => "surferUpdated",
        }
    }
}

/// Last lineup a user received, as written to the result cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedLineup {
    pub lineup: Lineup,
    pub preferences: Preferences,
    pub timestamp: i64,
}

impl CachedLineup {
    pub fn new(lineup: Lineup, preferences: Preferences) -> Self {
        Self { lineup, preferences, timestamp: now_millis() }
    }
}

/// Milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_engine::{seed, LineupOptimizer, RiskPreference};

    #[test]
    fn test_parse_optimize_request() {
        let raw = r#"{
            "type": "optimizeLineup",
            "userId": "fan-42",
            "preferences": {
                "budget": 50000,
                "riskPreference": "balanced",
                "selectedSurfers": ["griffin-colapinto"],
                "diversificationTarget": 65
            }
        }"#;

        match serde_json::from_str::<InboundMessage>(raw).unwrap() {
            InboundMessage::OptimizeLineup { user_id, preferences } => {
                assert_eq!(user_id, "fan-42");
                assert_eq!(preferences.budget, 50_000);
                assert_eq!(preferences.risk_preference, RiskPreference::Balanced);
                assert_eq!(preferences.locked_candidate_ids, vec!["griffin-colapinto"]);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_parse_surfer_update_and_refresh() {
        let raw = r#"{"type": "surferUpdate", "surferId": "kelly-slater", "updates": {"formAdjustment": 3.0}}"#;
        let msg: InboundMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.kind(), "surferUpdate");

        let msg: InboundMessage = serde_json::from_str(r#"{"type": "refreshRecommendations"}"#).unwrap();
        assert_eq!(msg, InboundMessage::RefreshRecommendations);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(serde_json::from_str::<InboundMessage>(r#"{"type": "pollVote"}"#).is_err());
    }

    #[test]
    fn test_lineup_optimized_wire_format() {
        let prefs = lineup_engine::Preferences::new(50_000, RiskPreference::Balanced);
        let lineup = LineupOptimizer::default().optimize(&seed::canonical_pool(), &prefs).unwrap();

        let value = serde_json::to_value(OutboundMessage::lineup_optimized("fan-42", lineup)).unwrap();
        assert_eq!(value["type"], "lineupOptimized");
        assert_eq!(value["userId"], "fan-42");
        assert!(value["timestamp"].is_i64());

        let lineup = &value["lineup"];
        for field in [
            "id",
            "name",
            "riskLevel",
            "surfers",
            "totalSalary",
            "budgetRemaining",
            "projectedPoints",
            "upside",
            "floor",
            "ownership",
            "diversification",
            "reasoning",
        ] {
            assert!(lineup.get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn test_error_wire_format() {
        let value =
            serde_json::to_value(OutboundMessage::optimization_error("fan-42", "Budget too low"))
                .unwrap();
        assert_eq!(value["type"], "optimizationError");
        assert_eq!(value["message"], "Budget too low");
    }
}
