use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::MatchingEngine;
use crate::engine::pricing::estimated_price;
use crate::error::MatchError;
use crate::geo::haversine_km;
use crate::models::candidate::Candidate;
use crate::models::request::MatchRequest;
use crate::models::ride::RideMatch;

pub fn match_score(candidate: &Candidate) -> f64 {
    candidate.rating / (candidate.eta_minutes + 1.0)
}

// first candidate wins ties: replace only on a strictly greater score
fn select_best<'a>(pool: &[&'a Candidate]) -> &'a Candidate {
    let mut best = pool[0];
    for &candidate in &pool[1..] {
        if match_score(candidate) > match_score(best) {
            best = candidate;
        }
    }
    best
}

impl MatchingEngine {
    pub async fn find_best_match(
        &mut self,
        request: &MatchRequest,
    ) -> Result<RideMatch, MatchError> {
        let radius_km = request
            .max_distance_km
            .unwrap_or(self.config.default_radius_km);

        let candidates = match self
            .fetch_nearby_candidates(&request.pickup, radius_km)
            .await
        {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "candidate discovery failed");
                return Err(MatchError::SearchFailed);
            }
        };

        if candidates.is_empty() {
            return Err(MatchError::NoCandidatesNearby);
        }

        let pool: Vec<&Candidate> = match &request.activity_type {
            Some(activity) => {
                let filtered: Vec<&Candidate> = candidates
                    .iter()
                    .filter(|candidate| candidate.activity.eq_ignore_ascii_case(activity))
                    .collect();

                if filtered.is_empty() {
                    candidates.iter().collect()
                } else {
                    filtered
                }
            }
            None => candidates.iter().collect(),
        };

        let best = select_best(&pool);
        let distance_km = haversine_km(&request.pickup, &best.location);

        info!(
            candidate_id = %best.id,
            score = match_score(best),
            distance_km,
            "match selected"
        );

        Ok(RideMatch {
            id: Uuid::new_v4(),
            candidate: best.clone(),
            eta_minutes: best.eta_minutes,
            price: estimated_price(distance_km),
            distance_km: (distance_km * 100.0).round() / 100.0,
            matched_at: Utc::now(),
        })
    }
}
