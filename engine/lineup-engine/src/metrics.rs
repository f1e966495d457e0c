//! Roster aggregation

use crate::types::Candidate;
use serde::Serialize;

/// Totals and averages over a selected roster
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupMetrics {
    pub total_salary: u64,
    pub projected_points: f64,
    pub upside: f64,
    /// Sum of downsides
    pub floor: f64,
    /// Mean ownership, 0 when nothing was selected
    pub ownership: f64,
    /// `budget - total_salary`
    pub budget_remaining: i64,
}

/// Aggregate a roster against the budget it was built for
pub fn aggregate(selected: &[Candidate], budget: u32) -> LineupMetrics {
    let total_salary: u64 = selected.iter().map(|c| c.salary as u64).sum();
    let projected_points: f64 = selected.iter().map(|c| c.projected_points).sum();
    let upside: f64 = selected.iter().map(|c| c.upside).sum();
    let floor: f64 = selected.iter().map(|c| c.downside).sum();

    let ownership = if selected.is_empty() {
        0.0
    } else {
        selected.iter().map(|c| c.ownership).sum::<f64>() / selected.len() as f64
    };

    LineupMetrics {
        total_salary,
        projected_points,
        upside,
        floor,
        ownership,
        budget_remaining: budget as i64 - total_salary as i64,
    }
}
