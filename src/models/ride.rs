use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::Candidate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideMatch {
    pub id: Uuid,
    pub candidate: Candidate,
    pub eta_minutes: f64,
    pub price: i64,
    pub distance_km: f64,
    pub matched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchStatus {
    Searching {
        message: String,
    },
    Found {
        message: String,
        candidate: Candidate,
    },
    Accepted {
        message: String,
        candidate: Candidate,
        eta_minutes: f64,
    },
    Error {
        message: String,
    },
}
