//! End-to-end message flow through the service state

use lineup_engine::{seed, PoolProvider};
use lineup_service::{
    CacheBackend, ChannelPublisher, LineupCache, OutboundMessage, ServiceConfig, ServiceState,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

async fn start(config: ServiceConfig) -> (ServiceState, UnboundedReceiver<OutboundMessage>) {
    let (publisher, receiver) = ChannelPublisher::channel();
    let state = ServiceState::new(config, Arc::new(publisher)).await.unwrap();
    (state, receiver)
}

fn drain(receiver: &mut UnboundedReceiver<OutboundMessage>) -> Vec<OutboundMessage> {
    let mut messages = Vec::new();
    while let Ok(message) = receiver.try_recv() {
        messages.push(message);
    }
    messages
}

#[tokio::test]
async fn test_mixed_stream_is_handled_in_order() {
    let (state, mut receiver) = start(ServiceConfig::default()).await;

    let input = [
        r#"{"type":"optimizeLineup","userId":"fan-1","preferences":{"budget":50000,"riskPreference":"balanced","selectedSurfers":["griffin-colapinto"]}}"#,
        r#"{"type":"optimizeLineup","userId":"fan-2","preferences":{"budget":25000,"riskPreference":"balanced","selectedSurfers":[]}}"#,
        r#"{"type":"definitelyNotAMessage"}"#,
        r#"{"type":"surferUpdate","surferId":"kelly-slater","updates":{"salary":7000}}"#,
        r#"{"type":"refreshRecommendations"}"#,
    ]
    .join("\n");

    let handled = state.serve(input.as_bytes(), std::future::pending()).await.unwrap();
    assert_eq!(handled, 5);

    let kinds: Vec<&str> = drain(&mut receiver).iter().map(|m| m.kind()).collect();
    assert_eq!(
        kinds,
        vec!["lineupOptimized", "optimizationError", "surferUpdated", "recommendationsUpdated"]
    );
}

#[tokio::test]
async fn test_locked_overspend_reports_error_message() {
    let (state, mut receiver) = start(ServiceConfig::default()).await;

    let everyone: Vec<String> =
        seed::canonical_candidates().into_iter().map(|c| format!("\"{}\"", c.id)).collect();
    let input = format!(
        r#"{{"type":"optimizeLineup","userId":"fan-3","preferences":{{"budget":30000,"riskPreference":"aggressive","selectedSurfers":[{}]}}}}"#,
        everyone.join(",")
    );

    state.serve(input.as_bytes(), std::future::pending()).await.unwrap();

    match drain(&mut receiver).as_slice() {
        [OutboundMessage::OptimizationError { user_id, message, .. }] => {
            assert_eq!(user_id, "fan-3");
            assert!(message.contains("exceeds the budget of 30000"), "{message}");
        }
        other => panic!("unexpected messages: {other:?}"),
    }
}

#[tokio::test]
async fn test_update_is_visible_to_later_requests() {
    let (state, mut receiver) = start(ServiceConfig::default()).await;

    let input = [
        r#"{"type":"surferUpdate","surferId":"jack-moore","updates":{"projectedPoints":120.0,"upside":150.0}}"#,
        r#"{"type":"optimizeLineup","userId":"fan-4","preferences":{"budget":30000,"riskPreference":"balanced"}}"#,
    ]
    .join("\n");

    state.serve(input.as_bytes(), std::future::pending()).await.unwrap();

    let messages = drain(&mut receiver);
    assert_eq!(messages.len(), 2);

    let OutboundMessage::SurferUpdated { surfer, .. } = &messages[0] else {
        panic!("expected surferUpdated, got {:?}", messages[0]);
    };
    assert_eq!(surfer.projected_points, 120.0);
    assert_eq!(state.pool.current().get("jack-moore").unwrap().projected_points, 120.0);

    let OutboundMessage::LineupOptimized { lineup, .. } = &messages[1] else {
        panic!("expected lineupOptimized, got {:?}", messages[1]);
    };
    assert_eq!(lineup.candidates[0].id, "jack-moore");
    assert!(lineup.total_salary <= 30_000);
}

#[tokio::test]
async fn test_lineup_is_cached_per_user() {
    let (state, _receiver) = start(ServiceConfig::default()).await;
    let cache = lineup_service::InMemoryLineupCache::new();

    // A handler sharing the service pool, wired to a cache the test can read
    let (publisher, mut receiver) = ChannelPublisher::channel();
    let handler = lineup_service::MessageHandler::new(
        &state.config,
        state.pool.clone(),
        Arc::new(publisher),
        Some(Arc::new(cache.clone())),
    );

    handler
        .handle_raw(r#"{"type":"optimizeLineup","userId":"fan-5","preferences":{"budget":45000,"riskPreference":"conservative","selectedSurfers":["john-john-florence","gabriel-medina"]}}"#)
        .await;

    let Some(OutboundMessage::LineupOptimized { lineup, .. }) = receiver.recv().await else {
        panic!("expected a lineup");
    };

    let cached = cache.fetch("lineup_fan-5_latest").await.unwrap().unwrap();
    assert_eq!(cached.lineup, lineup);
    assert!(cached.preferences.locked_candidate_ids.contains(&"gabriel-medina".to_string()));
    assert!(cache.fetch("lineup_fan-1_latest").await.unwrap().is_none());
}

#[tokio::test]
async fn test_disabled_cache_still_serves() {
    let mut config = ServiceConfig::default();
    config.cache.backend = CacheBackend::Disabled;
    let (state, mut receiver) = start(config).await;

    let input = r#"{"type":"optimizeLineup","userId":"fan-6","preferences":{"budget":60000,"riskPreference":"aggressive"}}"#;
    state.serve(input.as_bytes(), std::future::pending()).await.unwrap();

    assert!(matches!(
        drain(&mut receiver).as_slice(),
        [OutboundMessage::LineupOptimized { .. }]
    ));
}

#[tokio::test]
async fn test_budget_outside_integer_range_is_rejected() {
    let (state, mut receiver) = start(ServiceConfig::default()).await;

    let input = [
        r#"{"type":"optimizeLineup","userId":"fan-9","preferences":{"budget":-5,"riskPreference":"balanced","selectedSurfers":[]}}"#,
        r#"{"type":"optimizeLineup","userId":"fan-10","preferences":{"budget":1e12,"riskPreference":"balanced"}}"#,
    ]
    .join("\n");

    state.serve(input.as_bytes(), std::future::pending()).await.unwrap();

    let messages = drain(&mut receiver);
    assert_eq!(messages.len(), 2);
    for (message, expected_user) in messages.iter().zip(["fan-9", "fan-10"]) {
        match message {
            OutboundMessage::OptimizationError { user_id, message, .. } => {
                assert_eq!(user_id, expected_user);
                assert!(message.starts_with("Budget must be between 30000 and 60000"), "{message}");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
