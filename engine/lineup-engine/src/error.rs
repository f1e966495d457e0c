//! Error types for the lineup engine

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons a lineup request is rejected before any selection work starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Budget must be between {min} and {max} (got {budget})")]
    BudgetOutOfRange { budget: u32, min: u32, max: u32 },

    #[error("Too many locked selections: {count} (maximum {max})")]
    TooManyLocked { count: usize, max: usize },

    #[error("Locked selections cost {locked_salary}, which exceeds the budget of {budget}")]
    LockedSelectionOverBudget { locked_salary: u64, budget: u32 },
}

/// Wire-level kind of a [`ValidationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationErrorKind {
    BudgetOutOfRange,
    LockedSelectionOverBudget,
    TooManyLocked,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::BudgetOutOfRange { .. } => ValidationErrorKind::BudgetOutOfRange,
            ValidationError::TooManyLocked { .. } => ValidationErrorKind::TooManyLocked,
            ValidationError::LockedSelectionOverBudget { .. } => {
                ValidationErrorKind::LockedSelectionOverBudget
            }
        }
    }
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::BudgetOutOfRange => "budget-out-of-range",
            ValidationErrorKind::LockedSelectionOverBudget => "locked-selection-over-budget",
            ValidationErrorKind::TooManyLocked => "too-many-locked",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading or patching the candidate pool
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    #[error("Unknown candidate: {0}")]
    UnknownCandidate(String),

    #[error("Duplicate candidate id: {0}")]
    DuplicateCandidate(String),

    #[error("Invalid candidate {id}: {reason}")]
    InvalidCandidate { id: String, reason: String },

    #[error("Failed to parse candidate pool: {0}")]
    Parse(String),
}

impl PoolError {
    /// Create a new invalid candidate error
    pub fn invalid(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCandidate { id: id.into(), reason: reason.into() }
    }
}

impl From<serde_json::Error> for PoolError {
    fn from(err: serde_json::Error) -> Self {
        PoolError::Parse(err.to_string())
    }
}
