use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::GeoPoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub requester_id: Uuid,
    pub pickup: GeoPoint,
    pub dropoff: Option<GeoPoint>,
    pub activity_type: Option<String>,
    pub max_distance_km: Option<f64>,
    pub requested_at: DateTime<Utc>,
}

impl MatchRequest {
    pub fn new(requester_id: Uuid, pickup: GeoPoint) -> Self {
        Self {
            requester_id,
            pickup,
            dropoff: None,
            activity_type: None,
            max_distance_km: None,
            requested_at: Utc::now(),
        }
    }
}
