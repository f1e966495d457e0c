//! # Lineup Engine
//!
//! Builds fantasy rosters from a pool of candidate athletes under a salary cap,
//! a fixed roster size, user-locked picks and a risk strategy.
//!
//! The pipeline for a single request is:
//!
//! 1. **RequestValidator** - budget bounds, locked count and locked affordability
//! 2. **conditions::adjust** - applies live condition/form deltas to a pool copy
//! 3. **select_strategy** - maps a risk preference to a strategy descriptor
//! 4. **LineupBuilder** - greedy, budget-constrained slot fill
//! 5. **metrics::aggregate** - roster totals and averages
//!
//! [`LineupOptimizer`] wires these together over a [`PoolProvider`] snapshot.
//! The [`PresetGenerator`] produces the preference-independent presets.
//!
//! ```rust
//! use lineup_engine::{seed, LineupOptimizer, Preferences, RiskPreference};
//!
//! let pool = seed::canonical_pool();
//! let optimizer = LineupOptimizer::default();
//! let preferences = Preferences::new(50_000, RiskPreference::Balanced)
//!     .with_locked(["griffin-colapinto"]);
//!
//! let lineup = optimizer.optimize(&pool, &preferences).unwrap();
//! assert!(lineup.contains("griffin-colapinto"));
//! assert!(lineup.total_salary <= 50_000);
//! ```

pub mod builder;
pub mod conditions;
pub mod config;
pub mod error;
pub mod metrics;
pub mod optimizer;
pub mod pool;
pub mod presets;
pub mod seed;
pub mod strategy;
pub mod types;
pub mod validation;

pub use builder::LineupBuilder;
pub use config::EngineConfig;
pub use error::{PoolError, ValidationError, ValidationErrorKind};
pub use metrics::LineupMetrics;
pub use optimizer::LineupOptimizer;
pub use pool::{CandidatePatch, CandidatePool, InMemoryPoolProvider, PoolProvider};
pub use presets::PresetGenerator;
pub use strategy::{select_strategy, Prefilter, StrategyDescriptor};
pub use types::{
    Candidate, Lineup, MatchupRating, Preferences, RiskLevel, RiskPreference, WeatherImpact,
};
pub use validation::RequestValidator;

/// Current version of the lineup engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest budget a request may carry
pub const DEFAULT_MIN_BUDGET: u32 = 30_000;

/// Largest budget a request may carry
pub const DEFAULT_MAX_BUDGET: u32 = 60_000;

/// Number of roster slots in a lineup
pub const DEFAULT_ROSTER_SIZE: usize = 6;

/// Salary cap the presets are measured against
pub const DEFAULT_PRESET_REFERENCE_BUDGET: u32 = 50_000;
