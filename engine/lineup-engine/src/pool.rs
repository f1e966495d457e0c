//! Candidate pool snapshots and the provider that owns the canonical pool
//!
//! Requests read an immutable [`CandidatePool`] snapshot through
//! [`PoolProvider::current`]. The canonical pool only changes through
//! [`InMemoryPoolProvider::apply_patch`], and a patch is visible to later
//! snapshots only.

use crate::error::PoolError;
use crate::types::{points_per_thousand, Candidate, MatchupRating, RiskLevel, WeatherImpact};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Ordered, id-unique collection of candidates
///
/// Iteration order is the load order and drives every tie-break in the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    /// Build a pool, rejecting invalid candidates and duplicate ids
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, PoolError> {
        let mut seen = HashSet::with_capacity(candidates.len());
        for candidate in &candidates {
            candidate.validate()?;
            if !seen.insert(candidate.id.as_str()) {
                return Err(PoolError::DuplicateCandidate(candidate.id.clone()));
            }
        }

        Ok(Self { candidates })
    }

    /// Parse a JSON array of candidates
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let candidates: Vec<Candidate> = serde_json::from_str(json)?;
        Self::new(candidates)
    }

    /// Wrap candidates derived from an already validated pool
    pub(crate) fn from_validated(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl<'a> IntoIterator for &'a CandidatePool {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

impl<'de> Deserialize<'de> for CandidatePool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let candidates = Vec::<Candidate>::deserialize(deserializer)?;
        CandidatePool::new(candidates).map_err(serde::de::Error::custom)
    }
}

/// Read side of the candidate pool
pub trait PoolProvider: Send + Sync {
    /// Snapshot of the pool as of now
    fn current(&self) -> CandidatePool;
}

impl PoolProvider for CandidatePool {
    fn current(&self) -> CandidatePool {
        self.clone()
    }
}

/// Partial attribute update for a single candidate
///
/// Absent fields are left untouched. When salary or projected points change
/// without an explicit expected value, the expected value is recomputed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_points: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upside: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "floor")]
    pub downside: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions_bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_adjustment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matchup_rating: Option<MatchupRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_impact: Option<WeatherImpact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_ranking: Option<u32>,
}

impl CandidatePatch {
    pub fn is_empty(&self) -> bool {
        *self == CandidatePatch::default()
    }

    /// Merge the patch into a candidate
    pub fn apply_to(&self, candidate: &mut Candidate) {
        if let Some(name) = &self.display_name {
            candidate.display_name = name.clone();
        }
        if let Some(salary) = self.salary {
            candidate.salary = salary;
        }
        if let Some(risk_level) = self.risk_level {
            candidate.risk_level = risk_level;
        }
        if let Some(risk_score) = self.risk_score {
            candidate.risk_score = risk_score;
        }
        if let Some(points) = self.projected_points {
            candidate.projected_points = points;
        }
        if let Some(ownership) = self.ownership {
            candidate.ownership = ownership;
        }
        if let Some(upside) = self.upside {
            candidate.upside = upside;
        }
        if let Some(downside) = self.downside {
            candidate.downside = downside;
        }
        if let Some(bonus) = self.conditions_bonus {
            candidate.conditions_bonus = bonus;
        }
        if let Some(form) = self.form_adjustment {
            candidate.form_adjustment = form;
        }
        if let Some(matchup) = self.matchup_rating {
            candidate.matchup_rating = matchup;
        }
        if let Some(weather) = self.weather_impact {
            candidate.weather_impact = weather;
        }
        if let Some(tags) = &self.tags {
            candidate.tags = tags.clone();
        }
        if let Some(country) = &self.country {
            candidate.country = Some(country.clone());
        }
        if let Some(stance) = &self.stance {
            candidate.stance = Some(stance.clone());
        }
        if let Some(age) = self.age {
            candidate.age = Some(age);
        }
        if let Some(ranking) = self.world_ranking {
            candidate.world_ranking = Some(ranking);
        }

        match self.expected_value {
            Some(value) => candidate.expected_value = value,
            None if self.salary.is_some() || self.projected_points.is_some() => {
                // Salary 0 is rejected by validation after the merge
                if candidate.salary > 0 {
                    candidate.expected_value =
                        points_per_thousand(candidate.projected_points, candidate.salary);
                }
            }
            None => {}
        }
    }
}

/// Provider holding the canonical pool in memory
#[derive(Debug, Default)]
pub struct InMemoryPoolProvider {
    pool: RwLock<CandidatePool>,
}

impl InMemoryPoolProvider {
    pub fn new(pool: CandidatePool) -> Self {
        Self { pool: RwLock::new(pool) }
    }

    /// Apply a partial update to one candidate
    ///
    /// Returns the updated candidate. On error the canonical pool is unchanged.
    pub fn apply_patch(&self, id: &str, patch: &CandidatePatch) -> Result<Candidate, PoolError> {
        let mut pool = self.pool.write();
        let slot = pool
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PoolError::UnknownCandidate(id.to_string()))?;

        let mut updated = slot.clone();
        patch.apply_to(&mut updated);
        updated.validate()?;

        *slot = updated.clone();
        debug!("Applied patch to candidate {}", id);
        Ok(updated)
    }

    pub fn len(&self) -> usize {
        self.pool.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.read().is_empty()
    }
}

impl PoolProvider for InMemoryPoolProvider {
    fn current(&self) -> CandidatePool {
        self.pool.read().clone()
    }
}
