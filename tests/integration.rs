use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use uuid::Uuid;

use ride_matcher::config::Config;
use ride_matcher::engine::MatchingEngine;
use ride_matcher::error::MatchError;
use ride_matcher::geo::haversine_km;
use ride_matcher::models::candidate::GeoPoint;
use ride_matcher::models::request::MatchRequest;
use ride_matcher::models::ride::MatchStatus;

fn fast_config(seed: u64) -> Config {
    Config {
        discovery_delay_ms: 0,
        search_delay_ms: 0,
        acceptance_delay_ms: 0,
        retry_delay_ms: 0,
        tracking_interval_ms: 10,
        rng_seed: Some(seed),
        ..Config::default()
    }
}

fn pickup() -> GeoPoint {
    GeoPoint {
        lat: 19.4326,
        lng: -99.1332,
    }
}

fn request() -> MatchRequest {
    MatchRequest::new(Uuid::new_v4(), pickup())
}

#[tokio::test]
async fn fetch_returns_available_candidates_in_radius_sorted_by_eta() {
    let mut engine = MatchingEngine::new(fast_config(1));

    let candidates = engine
        .fetch_nearby_candidates(&pickup(), 5.0)
        .await
        .unwrap();

    assert!(candidates.len() >= 4);
    assert!(candidates.len() <= 5);

    for candidate in &candidates {
        assert!(candidate.is_available);
        assert!(haversine_km(&pickup(), &candidate.location) <= 5.0);
        assert!(candidate.eta_minutes >= 0.0);
    }

    for pair in candidates.windows(2) {
        assert!(pair[0].eta_minutes <= pair[1].eta_minutes);
    }
}

#[tokio::test]
async fn fetch_is_deterministic_for_a_seed() {
    let mut first_engine = MatchingEngine::new(fast_config(42));
    let mut second_engine = MatchingEngine::new(fast_config(42));

    let first = first_engine
        .fetch_nearby_candidates(&pickup(), 5.0)
        .await
        .unwrap();
    let second = second_engine
        .fetch_nearby_candidates(&pickup(), 5.0)
        .await
        .unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.location.lat, b.location.lat);
        assert_eq!(a.location.lng, b.location.lng);
    }
}

#[tokio::test]
async fn zero_radius_leaves_no_candidates() {
    let mut engine = MatchingEngine::new(fast_config(2));

    let candidates = engine
        .fetch_nearby_candidates(&pickup(), 0.0)
        .await
        .unwrap();
    assert!(candidates.is_empty());

    let mut req = request();
    req.max_distance_km = Some(0.0);

    let err = engine.find_best_match(&req).await.unwrap_err();
    assert!(matches!(err, MatchError::NoCandidatesNearby));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn activity_filter_matches_case_insensitively() {
    let mut engine = MatchingEngine::new(fast_config(7));

    let mut req = request();
    req.activity_type = Some("SPORT RIDE".to_string());

    let ride = engine.find_best_match(&req).await.unwrap();
    assert!(ride.candidate.activity.eq_ignore_ascii_case("sport ride"));
}

#[tokio::test]
async fn unmatched_activity_falls_back_to_full_pool() {
    let mut filtered_engine = MatchingEngine::new(fast_config(9));
    let mut open_engine = MatchingEngine::new(fast_config(9));

    let mut filtered_req = request();
    filtered_req.activity_type = Some("spinning class".to_string());
    let open_req = request();

    let filtered = filtered_engine.find_best_match(&filtered_req).await.unwrap();
    let open = open_engine.find_best_match(&open_req).await.unwrap();

    assert_eq!(filtered.candidate.id, open.candidate.id);
    assert_eq!(filtered.distance_km, open.distance_km);
    assert_eq!(filtered.price, open.price);
}

#[tokio::test]
async fn best_match_carries_consistent_pricing() {
    let mut engine = MatchingEngine::new(fast_config(11));

    let ride = engine.find_best_match(&request()).await.unwrap();

    assert!(ride.distance_km > 0.0);
    assert!(ride.distance_km <= 5.0);
    assert!(ride.price >= 25);
    assert!(ride.eta_minutes >= 1.0);

    let rendered = serde_json::to_value(&ride).unwrap();
    assert!(rendered["id"].as_str().unwrap().len() > 0);
    assert!(rendered["price"].as_i64().is_some());
    assert!(rendered["distance_km"].as_f64().is_some());
    assert!(rendered["candidate"]["id"].as_str().unwrap().starts_with("cyclist-"));
}

#[tokio::test]
async fn request_match_emits_searching_first_and_one_terminal_accept() {
    let mut engine = MatchingEngine::new(fast_config(3));
    let (tx, mut rx) = mpsc::channel(16);

    let outcome = engine.request_match(&request(), &tx).await;
    drop(tx);

    assert!(outcome.is_ok());

    let mut statuses = Vec::new();
    while let Some(status) = rx.recv().await {
        statuses.push(status);
    }

    assert!(statuses.len() == 3 || statuses.len() == 4);
    assert!(matches!(statuses.first(), Some(MatchStatus::Searching { .. })));
    assert!(matches!(statuses.get(1), Some(MatchStatus::Found { .. })));
    assert!(matches!(statuses.last(), Some(MatchStatus::Accepted { .. })));

    let accepted = statuses
        .iter()
        .filter(|status| matches!(status, MatchStatus::Accepted { .. }))
        .count();
    assert_eq!(accepted, 1);

    assert!(
        !statuses
            .iter()
            .any(|status| matches!(status, MatchStatus::Error { .. }))
    );
}

#[tokio::test]
async fn request_match_reports_error_when_nothing_nearby() {
    let mut engine = MatchingEngine::new(fast_config(4));
    let (tx, mut rx) = mpsc::channel(16);

    let mut req = request();
    req.max_distance_km = Some(0.0);

    let outcome = engine.request_match(&req, &tx).await;
    drop(tx);

    let err = outcome.unwrap_err();
    assert!(matches!(err, MatchError::NoCandidatesNearby));

    let mut statuses = Vec::new();
    while let Some(status) = rx.recv().await {
        statuses.push(status);
    }

    assert_eq!(statuses.len(), 2);
    assert!(matches!(statuses.first(), Some(MatchStatus::Searching { .. })));
    match statuses.last() {
        Some(MatchStatus::Error { message }) => assert_eq!(message, &err.to_string()),
        other => panic!("expected terminal error status, got {other:?}"),
    }
}

#[tokio::test]
async fn tracking_converges_without_reaching_the_anchor() {
    let mut engine = MatchingEngine::new(fast_config(5));
    let anchor = pickup();

    let mut subscription = engine.subscribe_to_candidate_location("cyclist-1", anchor.clone());

    for _ in 0..10 {
        let update = subscription.next_update().await.unwrap();
        assert!(!(update.lat == anchor.lat && update.lng == anchor.lng));
    }

    subscription.cancel();
}

#[tokio::test]
async fn cancelled_subscription_delivers_nothing_more() {
    let mut engine = MatchingEngine::new(fast_config(6));

    let mut subscription = engine.subscribe_to_candidate_location("cyclist-2", pickup());
    assert!(subscription.next_update().await.is_some());

    subscription.cancel();
    subscription.cancel();

    sleep(Duration::from_millis(60)).await;

    assert!(subscription.next_update().await.is_none());
    assert!(subscription.next_update().await.is_none());
}

#[tokio::test]
async fn subscriptions_do_not_interfere() {
    let mut engine = MatchingEngine::new(fast_config(8));

    let mut first = engine.subscribe_to_candidate_location("cyclist-1", pickup());
    let mut second = engine.subscribe_to_candidate_location("cyclist-3", pickup());

    assert!(first.next_update().await.is_some());
    first.cancel();

    assert!(second.next_update().await.is_some());
    assert!(second.next_update().await.is_some());
    second.cancel();

    assert!(first.next_update().await.is_none());
}

#[tokio::test]
async fn location_feed_works_as_a_stream() {
    let mut engine = MatchingEngine::new(fast_config(10));

    let subscription = engine.subscribe_to_candidate_location("cyclist-5", pickup());
    let updates: Vec<GeoPoint> = subscription.into_stream().take(3).collect().await;

    assert_eq!(updates.len(), 3);
}

#[tokio::test]
async fn cancel_ride_acknowledges() {
    let mut engine = MatchingEngine::new(fast_config(12));
    assert!(engine.cancel_ride(Uuid::new_v4()).await);
}
