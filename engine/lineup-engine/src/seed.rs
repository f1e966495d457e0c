//! Built-in candidate roster for the live-event demo
//!
//! `canonical_pool` holds the six headline athletes. `default_pool` adds the
//! rest of the demo field.

use crate::pool::CandidatePool;
use crate::types::{Candidate, MatchupRating, RiskLevel, WeatherImpact};
use std::collections::BTreeSet;

fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|t| t.to_string()).collect()
}

/// The six headline athletes in their canonical order
pub fn canonical_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            risk_score: 45,
            ownership: 32.5,
            upside: 95.0,
            downside: 60.0,
            conditions_bonus: 2.5,
            form_adjustment: 1.8,
            matchup_rating: MatchupRating::Favorable,
            weather_impact: WeatherImpact::Positive,
            tags: tags(&["aerial", "consistent"]),
            country: Some("USA".to_string()),
            stance: Some("regular".to_string()),
            age: Some(26),
            world_ranking: Some(1),
            ..Candidate::new("griffin-colapinto", "Griffin Colapinto", 12_500, RiskLevel::Medium, 78.5)
        },
        Candidate {
            risk_score: 25,
            ownership: 41.2,
            upside: 98.0,
            downside: 68.0,
            conditions_bonus: 3.0,
            form_adjustment: -0.5,
            matchup_rating: MatchupRating::Favorable,
            weather_impact: WeatherImpact::Positive,
            tags: tags(&["barrels", "pipeline"]),
            country: Some("USA".to_string()),
            stance: Some("regular".to_string()),
            age: Some(32),
            world_ranking: Some(4),
            ..Candidate::new("john-john-florence", "John John Florence", 13_800, RiskLevel::Low, 82.0)
        },
        Candidate {
            risk_score: 70,
            ownership: 12.3,
            upside: 88.0,
            downside: 30.0,
            conditions_bonus: 1.0,
            form_adjustment: -2.0,
            matchup_rating: MatchupRating::Neutral,
            weather_impact: WeatherImpact::Neutral,
            tags: tags(&["legend", "veteran"]),
            country: Some("USA".to_string()),
            stance: Some("regular".to_string()),
            age: Some(53),
            world_ranking: Some(29),
            ..Candidate::new("kelly-slater", "Kelly Slater", 8_900, RiskLevel::High, 58.0)
        },
        Candidate {
            risk_score: 40,
            ownership: 28.7,
            upside: 92.0,
            downside: 58.0,
            conditions_bonus: 0.5,
            form_adjustment: 2.2,
            matchup_rating: MatchupRating::Favorable,
            weather_impact: WeatherImpact::Neutral,
            tags: tags(&["aerial", "competitor"]),
            country: Some("BRA".to_string()),
            stance: Some("goofy".to_string()),
            age: Some(31),
            world_ranking: Some(2),
            ..Candidate::new("gabriel-medina", "Gabriel Medina", 11_200, RiskLevel::Medium, 75.0)
        },
        Candidate {
            risk_score: 88,
            ownership: 8.4,
            upside: 94.0,
            downside: 22.0,
            conditions_bonus: -1.5,
            form_adjustment: 3.5,
            matchup_rating: MatchupRating::Difficult,
            weather_impact: WeatherImpact::Negative,
            tags: tags(&["aerial", "explosive"]),
            country: Some("BRA".to_string()),
            stance: Some("goofy".to_string()),
            age: Some(31),
            world_ranking: Some(6),
            ..Candidate::new("italo-ferreira", "Italo Ferreira", 7_600, RiskLevel::Extreme, 55.0)
        },
        Candidate {
            risk_score: 50,
            ownership: 15.6,
            upside: 80.0,
            downside: 45.0,
            conditions_bonus: 1.5,
            form_adjustment: 0.8,
            matchup_rating: MatchupRating::Neutral,
            weather_impact: WeatherImpact::Positive,
            tags: tags(&["power", "rising"]),
            country: Some("USA".to_string()),
            stance: Some("regular".to_string()),
            age: Some(25),
            world_ranking: Some(12),
            ..Candidate::new("jack-moore", "Jack Moore", 9_800, RiskLevel::Medium, 62.0)
        },
    ]
}

/// The rest of the demo field
fn supporting_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            risk_score: 65,
            ownership: 22.1,
            upside: 96.0,
            downside: 40.0,
            conditions_bonus: -0.5,
            form_adjustment: 1.2,
            matchup_rating: MatchupRating::Neutral,
            weather_impact: WeatherImpact::Neutral,
            tags: tags(&["aerial", "speed"]),
            country: Some("BRA".to_string()),
            stance: Some("regular".to_string()),
            age: Some(30),
            world_ranking: Some(3),
            ..Candidate::new("filipe-toledo", "Filipe Toledo", 12_000, RiskLevel::High, 72.0)
        },
        Candidate {
            risk_score: 30,
            ownership: 18.9,
            upside: 84.0,
            downside: 52.0,
            conditions_bonus: 2.0,
            form_adjustment: 0.4,
            matchup_rating: MatchupRating::Favorable,
            weather_impact: WeatherImpact::Positive,
            tags: tags(&["consistent", "rail"]),
            country: Some("AUS".to_string()),
            stance: Some("regular".to_string()),
            age: Some(26),
            world_ranking: Some(5),
            ..Candidate::new("ethan-ewing", "Ethan Ewing", 10_400, RiskLevel::Low, 66.0)
        },
        Candidate {
            risk_score: 75,
            ownership: 6.2,
            upside: 86.0,
            downside: 25.0,
            conditions_bonus: 0.0,
            form_adjustment: 2.8,
            matchup_rating: MatchupRating::Neutral,
            weather_impact: WeatherImpact::Neutral,
            tags: tags(&["aerial", "progressive"]),
            country: Some("BRA".to_string()),
            stance: Some("goofy".to_string()),
            age: Some(28),
            world_ranking: Some(8),
            ..Candidate::new("yago-dora", "Yago Dora", 8_200, RiskLevel::High, 52.0)
        },
        Candidate {
            risk_score: 42,
            ownership: 4.8,
            upside: 70.0,
            downside: 38.0,
            conditions_bonus: 1.0,
            form_adjustment: -0.3,
            matchup_rating: MatchupRating::Difficult,
            weather_impact: WeatherImpact::Neutral,
            tags: tags(&["barrels", "value"]),
            country: Some("ITA".to_string()),
            stance: Some("regular".to_string()),
            age: Some(27),
            world_ranking: Some(17),
            ..Candidate::new(
                "leonardo-fioravanti",
                "Leonardo Fioravanti",
                6_800,
                RiskLevel::Medium,
                48.0,
            )
        },
    ]
}

/// Pool of the six headline athletes
pub fn canonical_pool() -> CandidatePool {
    CandidatePool::from_validated(canonical_candidates())
}

/// Full demo pool: headline athletes first, then the supporting field
pub fn default_pool() -> CandidatePool {
    let mut candidates = canonical_candidates();
    candidates.extend(supporting_candidates());
    CandidatePool::from_validated(candidates)
}
