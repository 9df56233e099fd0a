use std::env;

use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use ride_matcher::config::Config;
use ride_matcher::engine::MatchingEngine;
use ride_matcher::error::MatchError;
use ride_matcher::models::candidate::GeoPoint;
use ride_matcher::models::request::MatchRequest;
use ride_matcher::models::ride::MatchStatus;

// Mexico City Zocalo, used when no pickup is supplied
const FALLBACK_PICKUP: GeoPoint = GeoPoint {
    lat: 19.4326,
    lng: -99.1332,
};

#[tokio::main]
async fn main() -> Result<(), MatchError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let pickup = pickup_from_env();
    let mut engine = MatchingEngine::new(config);

    let mut request = MatchRequest::new(Uuid::new_v4(), pickup.clone());
    request.activity_type = env::var("ACTIVITY_TYPE").ok();

    let (status_tx, mut status_rx) = mpsc::channel(16);

    let printer = tokio::spawn(async move {
        while let Some(status) = status_rx.recv().await {
            match status {
                MatchStatus::Searching { message } => info!(%message, "searching"),
                MatchStatus::Found { message, candidate } => {
                    info!(%message, candidate = %candidate.name, "found")
                }
                MatchStatus::Accepted {
                    message,
                    candidate,
                    eta_minutes,
                } => info!(%message, candidate = %candidate.name, eta_minutes, "accepted"),
                MatchStatus::Error { message } => error!(%message, "match failed"),
            }
        }
    });

    let outcome = engine.request_match(&request, &status_tx).await;
    drop(status_tx);
    let _ = printer.await;

    match outcome {
        Ok(ride) => {
            let summary = serde_json::to_string(&ride)
                .map_err(|err| MatchError::Internal(format!("failed to render match: {err}")))?;
            info!(%summary, "ride matched");

            let mut subscription =
                engine.subscribe_to_candidate_location(&ride.candidate.id, pickup);

            for _ in 0..3 {
                if let Some(location) = subscription.next_update().await {
                    info!(lat = location.lat, lng = location.lng, "candidate moving");
                }
            }

            subscription.cancel();
            engine.cancel_ride(ride.id).await;
        }
        Err(err) => error!(error = %err, "no match"),
    }

    Ok(())
}

fn pickup_from_env() -> GeoPoint {
    let lat = env::var("PICKUP_LAT").ok().and_then(|raw| raw.parse().ok());
    let lng = env::var("PICKUP_LNG").ok().and_then(|raw| raw.parse().ok());

    match (lat, lng) {
        (Some(lat), Some(lng)) => GeoPoint { lat, lng },
        _ => FALLBACK_PICKUP,
    }
}
