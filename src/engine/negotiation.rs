use rand::Rng;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::info;
use uuid::Uuid;

use crate::engine::MatchingEngine;
use crate::error::MatchError;
use crate::models::request::MatchRequest;
use crate::models::ride::{MatchStatus, RideMatch};

impl MatchingEngine {
    pub async fn request_match(
        &mut self,
        request: &MatchRequest,
        updates: &mpsc::Sender<MatchStatus>,
    ) -> Result<RideMatch, MatchError> {
        let _ = updates
            .send(MatchStatus::Searching {
                message: "Searching for nearby cyclists...".to_string(),
            })
            .await;
        sleep(Duration::from_millis(self.config.search_delay_ms)).await;

        let ride = match self.find_best_match(request).await {
            Ok(ride) => ride,
            Err(err) => {
                let _ = updates
                    .send(MatchStatus::Error {
                        message: err.to_string(),
                    })
                    .await;
                return Err(err);
            }
        };

        let _ = updates
            .send(MatchStatus::Found {
                message: "Cyclist found".to_string(),
                candidate: ride.candidate.clone(),
            })
            .await;
        sleep(Duration::from_millis(self.config.acceptance_delay_ms)).await;

        let accepted = self.rng.gen_bool(self.config.acceptance_rate);
        if !accepted {
            // the retry sticks with the same candidate and always goes through
            info!(candidate_id = %ride.candidate.id, "candidate declined, retrying");
            let _ = updates
                .send(MatchStatus::Searching {
                    message: "Looking for another cyclist...".to_string(),
                })
                .await;
            sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
        }

        let _ = updates
            .send(MatchStatus::Accepted {
                message: "Cyclist on the way!".to_string(),
                candidate: ride.candidate.clone(),
                eta_minutes: ride.eta_minutes,
            })
            .await;

        info!(
            ride_id = %ride.id,
            candidate_id = %ride.candidate.id,
            eta_minutes = ride.eta_minutes,
            "match accepted"
        );

        Ok(ride)
    }

    pub async fn cancel_ride(&mut self, ride_id: Uuid) -> bool {
        sleep(Duration::from_millis(self.config.discovery_delay_ms)).await;
        info!(%ride_id, "ride cancelled");
        true
    }
}
