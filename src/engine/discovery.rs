use rand::Rng;
use tokio::time::{Duration, sleep};
use tracing::debug;

use crate::engine::MatchingEngine;
use crate::engine::pricing::estimated_arrival_minutes;
use crate::error::MatchError;
use crate::geo::haversine_km;
use crate::models::candidate::{Candidate, GeoPoint};

struct RosterEntry {
    name: &'static str,
    rating: f64,
    activity: &'static str,
    vehicle_type: &'static str,
    phone: &'static str,
    jitter_deg: f64,
    availability: f64,
}

const ROSTER: [RosterEntry; 5] = [
    RosterEntry {
        name: "Ana Rodriguez",
        rating: 4.9,
        activity: "casual ride",
        vehicle_type: "mountain bike",
        phone: "+52 55 1234 5678",
        jitter_deg: 0.010,
        availability: 1.0,
    },
    RosterEntry {
        name: "Carlos Martinez",
        rating: 4.7,
        activity: "sport ride",
        vehicle_type: "road bike",
        phone: "+52 55 2345 6789",
        jitter_deg: 0.015,
        availability: 1.0,
    },
    RosterEntry {
        name: "Sofia Lopez",
        rating: 4.8,
        activity: "urban adventure",
        vehicle_type: "city bike",
        phone: "+52 55 3456 7890",
        jitter_deg: 0.020,
        availability: 1.0,
    },
    RosterEntry {
        name: "Miguel Torres",
        rating: 4.6,
        activity: "casual ride",
        vehicle_type: "electric bike",
        phone: "+52 55 4567 8901",
        jitter_deg: 0.025,
        availability: 0.7,
    },
    RosterEntry {
        name: "Laura Hernandez",
        rating: 4.95,
        activity: "sport ride",
        vehicle_type: "mountain bike",
        phone: "+52 55 5678 9012",
        jitter_deg: 0.008,
        availability: 1.0,
    },
];

impl MatchingEngine {
    pub async fn fetch_nearby_candidates(
        &mut self,
        pickup: &GeoPoint,
        max_distance_km: f64,
    ) -> Result<Vec<Candidate>, MatchError> {
        sleep(Duration::from_millis(self.config.discovery_delay_ms)).await;

        let mut candidates = Vec::new();

        for (index, entry) in ROSTER.iter().enumerate() {
            let location = GeoPoint {
                lat: pickup.lat + self.rng.gen_range(-0.5..0.5) * entry.jitter_deg,
                lng: pickup.lng + self.rng.gen_range(-0.5..0.5) * entry.jitter_deg,
            };
            let is_available = self.rng.gen_bool(entry.availability);

            if !is_available {
                continue;
            }

            let distance_km = haversine_km(pickup, &location);
            if distance_km > max_distance_km {
                continue;
            }

            candidates.push(Candidate {
                id: format!("cyclist-{}", index + 1),
                name: entry.name.to_string(),
                rating: entry.rating,
                location,
                activity: entry.activity.to_string(),
                photo_url: photo_url(entry.name),
                is_available,
                phone: entry.phone.to_string(),
                vehicle_type: entry.vehicle_type.to_string(),
                eta_minutes: estimated_arrival_minutes(distance_km),
            });
        }

        candidates.sort_by(|a, b| a.eta_minutes.total_cmp(&b.eta_minutes));

        debug!(
            count = candidates.len(),
            max_distance_km, "nearby candidates ready"
        );

        Ok(candidates)
    }
}

fn photo_url(name: &str) -> String {
    let seed = name.split_whitespace().next().unwrap_or(name);
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}
