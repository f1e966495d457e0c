//! Core data model: candidates, request preferences and lineups

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Volatility bucket of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Extreme => "extreme",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heat matchup quality for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchupRating {
    Favorable,
    #[default]
    Neutral,
    Difficult,
}

/// How the current conditions suit the candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherImpact {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// Risk strategy requested by the user
///
/// Unrecognised input falls back to [`RiskPreference::Balanced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskPreference {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl RiskPreference {
    /// Parse user input, defaulting to balanced for anything unknown
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "conservative" => RiskPreference::Conservative,
            "aggressive" => RiskPreference::Aggressive,
            _ => RiskPreference::Balanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskPreference::Conservative => "conservative",
            RiskPreference::Balanced => "balanced",
            RiskPreference::Aggressive => "aggressive",
        }
    }
}

impl<'de> Deserialize<'de> for RiskPreference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(RiskPreference::from_input).unwrap_or_default())
    }
}

impl fmt::Display for RiskPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Projected points per 1000 salary units
pub fn points_per_thousand(points: f64, salary: u32) -> f64 {
    points / (salary as f64 / 1000.0)
}

/// An athlete eligible for fantasy selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Unique slug (e.g., "griffin-colapinto")
    pub id: String,

    /// Display name (e.g., "Griffin Colapinto")
    pub display_name: String,

    /// Fantasy salary, always positive
    pub salary: u32,

    pub risk_level: RiskLevel,

    /// 0-100
    pub risk_score: u8,

    pub projected_points: f64,

    /// Projected points per 1000 salary
    pub expected_value: f64,

    /// Percentage of rosters expected to include this candidate (0-100)
    pub ownership: f64,

    /// Best-case projected score
    pub upside: f64,

    /// Worst-case projected score (floor)
    #[serde(alias = "floor")]
    pub downside: f64,

    /// Live conditions delta applied to projections
    #[serde(default)]
    pub conditions_bonus: f64,

    /// Recent form delta applied to projections
    #[serde(default)]
    pub form_adjustment: f64,

    #[serde(default)]
    pub matchup_rating: MatchupRating,

    #[serde(default)]
    pub weather_impact: WeatherImpact,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// "regular" or "goofy"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_ranking: Option<u32>,
}

impl Candidate {
    /// Create a candidate with neutral conditions and a symmetric ±25% range
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        salary: u32,
        risk_level: RiskLevel,
        projected_points: f64,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            salary,
            risk_level,
            risk_score: 50,
            projected_points,
            expected_value: points_per_thousand(projected_points, salary),
            ownership: 0.0,
            upside: projected_points * 1.25,
            downside: projected_points * 0.75,
            conditions_bonus: 0.0,
            form_adjustment: 0.0,
            matchup_rating: MatchupRating::Neutral,
            weather_impact: WeatherImpact::Neutral,
            tags: BTreeSet::new(),
            country: None,
            stance: None,
            age: None,
            world_ranking: None,
        }
    }

    /// Check the candidate invariants
    pub fn validate(&self) -> Result<(), crate::PoolError> {
        if self.id.trim().is_empty() {
            return Err(crate::PoolError::invalid(&self.id, "id must not be empty"));
        }

        if self.salary == 0 {
            return Err(crate::PoolError::invalid(&self.id, "salary must be positive"));
        }

        if !(0.0..=100.0).contains(&self.ownership) {
            return Err(crate::PoolError::invalid(
                &self.id,
                format!("ownership {} is outside 0-100", self.ownership),
            ));
        }

        let scores = [
            ("projectedPoints", self.projected_points),
            ("expectedValue", self.expected_value),
            ("upside", self.upside),
            ("downside", self.downside),
            ("conditionsBonus", self.conditions_bonus),
            ("formAdjustment", self.form_adjustment),
        ];
        if let Some((field, value)) = scores.iter().find(|(_, value)| !value.is_finite()) {
            return Err(crate::PoolError::invalid(
                &self.id,
                format!("{field} {value} is not finite"),
            ));
        }

        if self.risk_score > 100 {
            return Err(crate::PoolError::invalid(
                &self.id,
                format!("risk score {} is outside 0-100", self.risk_score),
            ));
        }

        Ok(())
    }

}

/// User preferences carried by an optimization request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Negative budgets read as 0 and oversized ones as `u32::MAX`; fractions
    /// are truncated
    #[serde(deserialize_with = "saturating_budget")]
    pub budget: u32,

    #[serde(default)]
    pub risk_preference: RiskPreference,

    /// Candidate ids the user pre-selected, in the order they were picked
    #[serde(rename = "selectedSurfers", default)]
    pub locked_candidate_ids: Vec<String>,

    /// Accepted for compatibility; the builder does not consume it
    #[serde(default)]
    pub diversification_target: f64,
}

fn saturating_budget<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    // Float-to-int `as` casts saturate at both ends
    Ok(f64::deserialize(deserializer)? as u32)
}

impl Preferences {
    pub fn new(budget: u32, risk_preference: RiskPreference) -> Self {
        Self {
            budget,
            risk_preference,
            locked_candidate_ids: Vec::new(),
            diversification_target: 0.0,
        }
    }

    /// Replace the locked picks
    pub fn with_locked<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locked_candidate_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// A selected roster together with its aggregate metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup {
    pub id: String,

    pub name: String,

    pub risk_level: RiskLevel,

    /// Selected candidates in selection order
    #[serde(rename = "surfers")]
    pub candidates: Vec<Candidate>,

    pub total_salary: u64,

    /// May be negative for presets measured against the reference budget
    pub budget_remaining: i64,

    pub projected_points: f64,

    pub upside: f64,

    pub floor: f64,

    /// Mean ownership, 0 for an empty roster
    pub ownership: f64,

    pub diversification: u32,

    pub reasoning: Vec<String>,
}

impl Lineup {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, candidate_id: &str) -> bool {
        self.candidates.iter().any(|c| c.id == candidate_id)
    }

    pub fn candidate_ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_preference_parsing() {
        assert_eq!(RiskPreference::from_input("conservative"), RiskPreference::Conservative);
        assert_eq!(RiskPreference::from_input("Aggressive"), RiskPreference::Aggressive);
        assert_eq!(RiskPreference::from_input("balanced"), RiskPreference::Balanced);
        assert_eq!(RiskPreference::from_input("yolo"), RiskPreference::Balanced);
    }

    #[test]
    fn test_preferences_wire_format() {
        let json = r#"{
            "budget": 45000,
            "riskPreference": "degen",
            "selectedSurfers": ["john-john-florence"],
            "diversificationTarget": 70
        }"#;
        let prefs: Preferences = serde_json::from_str(json).unwrap();

        assert_eq!(prefs.budget, 45_000);
        assert_eq!(prefs.risk_preference, RiskPreference::Balanced);
        assert_eq!(prefs.locked_candidate_ids, vec!["john-john-florence"]);
        assert_eq!(prefs.diversification_target, 70.0);
    }

    #[test]
    fn test_preferences_missing_optional_fields() {
        let prefs: Preferences = serde_json::from_str(r#"{"budget": 50000}"#).unwrap();
        assert_eq!(prefs.risk_preference, RiskPreference::Balanced);
        assert!(prefs.locked_candidate_ids.is_empty());
    }

    #[test]
    fn test_candidate_validation() {
        let candidate = Candidate::new("moore", "Jack Moore", 9_800, RiskLevel::Medium, 42.0);
        assert!(candidate.validate().is_ok());
        assert!((candidate.expected_value - 42.0 / 9.8).abs() < 1e-9);

        let broke = Candidate { salary: 0, ..candidate.clone() };
        assert!(broke.validate().is_err());

        let overowned = Candidate { ownership: 101.0, ..candidate.clone() };
        assert!(overowned.validate().is_err());

        let unscored = Candidate { expected_value: f64::NAN, ..candidate.clone() };
        assert!(matches!(unscored.validate(), Err(crate::PoolError::InvalidCandidate { .. })));

        let unbounded = Candidate { upside: f64::INFINITY, ..candidate };
        assert!(unbounded.validate().is_err());
    }

    #[test]
    fn test_budget_outside_u32_saturates() {
        let parse = |budget: &str| -> u32 {
            serde_json::from_str::<Preferences>(&format!(r#"{{"budget": {budget}}}"#))
                .unwrap()
                .budget
        };

        assert_eq!(parse("-5"), 0);
        assert_eq!(parse("25000.5"), 25_000);
        assert_eq!(parse("99999999999"), u32::MAX);
        assert_eq!(parse("45000"), 45_000);
        assert!(serde_json::from_str::<Preferences>(r#"{"budget": "lots"}"#).is_err());
    }

    #[test]
    fn test_candidate_wire_names() {
        let mut candidate = Candidate::new("moore", "Jack Moore", 9_800, RiskLevel::Medium, 42.0);
        candidate.tags.insert("local".to_string());

        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["displayName"], "Jack Moore");
        assert_eq!(value["riskLevel"], "medium");
        assert_eq!(value["matchupRating"], "neutral");
        assert_eq!(value["tags"][0], "local");
        assert!(value.get("country").is_none());
    }
}
