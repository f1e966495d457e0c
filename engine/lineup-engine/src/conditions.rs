//! Live condition adjustments
//!
//! Folds each candidate's conditions bonus and form adjustment into its
//! projections. The adjustment is applied once per request to a copy of the
//! snapshot; the canonical pool never sees adjusted values.

use crate::pool::CandidatePool;
use crate::types::{points_per_thousand, Candidate};

/// Adjusted copy of a single candidate
pub fn adjust_candidate(candidate: &Candidate) -> Candidate {
    let mut adjusted = candidate.clone();

    adjusted.projected_points =
        candidate.projected_points + candidate.conditions_bonus + candidate.form_adjustment;
    adjusted.expected_value = points_per_thousand(adjusted.projected_points, candidate.salary);

    // Good conditions raise the ceiling, bad conditions lower the floor
    adjusted.upside = candidate.upside + candidate.conditions_bonus.max(0.0);
    adjusted.downside = candidate.downside + candidate.conditions_bonus.min(0.0);

    adjusted
}

/// Adjusted copy of a whole pool, order preserved
pub fn adjust(pool: &CandidatePool) -> CandidatePool {
    CandidatePool::from_validated(pool.iter().map(adjust_candidate).collect())
}
