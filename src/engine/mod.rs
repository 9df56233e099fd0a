pub mod discovery;
pub mod matching;
pub mod negotiation;
pub mod pricing;
pub mod tracking;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;

pub struct MatchingEngine {
    config: Config,
    rng: StdRng,
}

impl MatchingEngine {
    pub fn new(config: Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }
}
