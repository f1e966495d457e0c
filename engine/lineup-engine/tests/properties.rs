//! Property tests for the lineup invariants

use lineup_engine::{
    Candidate, CandidatePool, LineupOptimizer, Preferences, RiskLevel, RiskPreference,
};
use proptest::prelude::*;

fn risk_level() -> impl Strategy<Value = RiskLevel> {
    prop_oneof![
        Just(RiskLevel::Low),
        Just(RiskLevel::Medium),
        Just(RiskLevel::High),
        Just(RiskLevel::Extreme),
    ]
}

fn risk_preference() -> impl Strategy<Value = RiskPreference> {
    prop_oneof![
        Just(RiskPreference::Conservative),
        Just(RiskPreference::Balanced),
        Just(RiskPreference::Aggressive),
    ]
}

prop_compose! {
    fn candidate(index: usize)(
        salary in 3_000u32..18_000,
        level in risk_level(),
        points in 20.0f64..100.0,
        spread in 0.0f64..40.0,
        ownership in 0.0f64..100.0,
        conditions_bonus in -3.0f64..3.0,
        form_adjustment in -4.0f64..4.0,
    ) -> Candidate {
        Candidate {
            ownership,
            upside: points + spread,
            downside: points - spread,
            conditions_bonus,
            form_adjustment,
            ..Candidate::new(format!("surfer-{index}"), format!("Surfer {index}"), salary, level, points)
        }
    }
}

fn pool() -> impl Strategy<Value = CandidatePool> {
    (1usize..16)
        .prop_flat_map(|size| (0..size).map(candidate).collect::<Vec<_>>())
        .prop_map(|candidates| CandidatePool::new(candidates).unwrap())
}

fn request() -> impl Strategy<Value = (CandidatePool, Preferences)> {
    (pool(), 30_000u32..=60_000, risk_preference(), proptest::collection::vec(0usize..16, 0..4))
        .prop_map(|(pool, budget, preference, locked)| {
            let ids: Vec<String> = locked.into_iter().map(|i| format!("surfer-{i}")).collect();
            (pool, Preferences::new(budget, preference).with_locked(ids))
        })
}

proptest! {
    #[test]
    fn lineup_never_exceeds_budget_or_roster((pool, prefs) in request()) {
        if let Ok(lineup) = LineupOptimizer::default().optimize(&pool, &prefs) {
            prop_assert!(lineup.total_salary <= prefs.budget as u64);
            prop_assert!(lineup.len() <= 6);
            prop_assert!(lineup.budget_remaining >= 0);
        }
    }

    #[test]
    fn validated_locks_are_always_included((pool, prefs) in request()) {
        if let Ok(lineup) = LineupOptimizer::default().optimize(&pool, &prefs) {
            for id in &prefs.locked_candidate_ids {
                if pool.contains(id) {
                    prop_assert!(lineup.contains(id), "missing locked {}", id);
                }
            }
        }
    }

    #[test]
    fn same_input_same_lineup((pool, prefs) in request()) {
        let optimizer = LineupOptimizer::default();
        prop_assert_eq!(optimizer.optimize(&pool, &prefs), optimizer.optimize(&pool, &prefs));
    }

    #[test]
    fn totals_are_exact_sums((pool, prefs) in request()) {
        if let Ok(lineup) = LineupOptimizer::default().optimize(&pool, &prefs) {
            let salary: u64 = lineup.candidates.iter().map(|c| c.salary as u64).sum();
            let points: f64 = lineup.candidates.iter().map(|c| c.projected_points).sum();
            prop_assert_eq!(lineup.total_salary, salary);
            prop_assert_eq!(lineup.projected_points, points);
            prop_assert!(!lineup.ownership.is_nan());
        }
    }
}
