use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub location: GeoPoint,
    pub activity: String,
    pub photo_url: String,
    pub is_available: bool,
    pub phone: String,
    pub vehicle_type: String,
    pub eta_minutes: f64,
}
