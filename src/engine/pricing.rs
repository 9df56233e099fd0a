const AVERAGE_SPEED_KMH: f64 = 15.0;
const BASE_FARE: f64 = 25.0;
const PER_KM_RATE: f64 = 8.0;

pub fn estimated_arrival_minutes(distance_km: f64) -> f64 {
    (distance_km / AVERAGE_SPEED_KMH * 60.0).ceil()
}

pub fn estimated_price(distance_km: f64) -> i64 {
    (BASE_FARE + distance_km * PER_KM_RATE).round() as i64
}
