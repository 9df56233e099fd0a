use std::env;

use crate::error::MatchError;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub discovery_delay_ms: u64,
    pub search_delay_ms: u64,
    pub acceptance_delay_ms: u64,
    pub retry_delay_ms: u64,
    pub tracking_interval_ms: u64,
    pub default_radius_km: f64,
    pub acceptance_rate: f64,
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            discovery_delay_ms: 500,
            search_delay_ms: 1500,
            acceptance_delay_ms: 2000,
            retry_delay_ms: 1000,
            tracking_interval_ms: 2000,
            default_radius_km: 5.0,
            acceptance_rate: 0.9,
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, MatchError> {
        let _ = dotenvy::dotenv();

        let rng_seed = match env::var("RNG_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|err| MatchError::Internal(format!("invalid RNG_SEED: {err}")))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            discovery_delay_ms: parse_or_default("DISCOVERY_DELAY_MS", 500)?,
            search_delay_ms: parse_or_default("SEARCH_DELAY_MS", 1500)?,
            acceptance_delay_ms: parse_or_default("ACCEPTANCE_DELAY_MS", 2000)?,
            retry_delay_ms: parse_or_default("RETRY_DELAY_MS", 1000)?,
            tracking_interval_ms: parse_or_default("TRACKING_INTERVAL_MS", 2000)?,
            default_radius_km: parse_or_default("DEFAULT_RADIUS_KM", 5.0)?,
            acceptance_rate: parse_or_default("ACCEPTANCE_RATE", 0.9)?,
            rng_seed,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, MatchError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| MatchError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
