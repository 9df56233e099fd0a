use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use crate::engine::MatchingEngine;
use crate::models::candidate::GeoPoint;

const APPROACH_FACTOR: f64 = 0.1;
const INITIAL_JITTER_DEG: f64 = 0.01;
const TICK_JITTER_DEG: f64 = 0.0002;

pub struct LocationSubscription {
    rx: watch::Receiver<GeoPoint>,
    task: JoinHandle<()>,
    cancelled: bool,
}

impl MatchingEngine {
    pub fn subscribe_to_candidate_location(
        &mut self,
        candidate_id: &str,
        anchor: GeoPoint,
    ) -> LocationSubscription {
        let start = GeoPoint {
            lat: anchor.lat + self.rng.gen_range(-0.5..0.5) * INITIAL_JITTER_DEG,
            lng: anchor.lng + self.rng.gen_range(-0.5..0.5) * INITIAL_JITTER_DEG,
        };
        let seed = self.rng.next_u64();
        let period = Duration::from_millis(self.config.tracking_interval_ms);
        let candidate_id = candidate_id.to_string();
        let (tx, rx) = watch::channel(start.clone());

        debug!(%candidate_id, "location feed started");

        let task = tokio::spawn(async move {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut current = start;
            let mut ticker = interval(period);
            // the first interval tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                current = GeoPoint {
                    lat: current.lat
                        + (anchor.lat - current.lat) * APPROACH_FACTOR
                        + rng.gen_range(-0.5..0.5) * TICK_JITTER_DEG,
                    lng: current.lng
                        + (anchor.lng - current.lng) * APPROACH_FACTOR
                        + rng.gen_range(-0.5..0.5) * TICK_JITTER_DEG,
                };

                if tx.send(current.clone()).is_err() {
                    break;
                }
            }

            debug!(%candidate_id, "location feed closed");
        });

        LocationSubscription {
            rx,
            task,
            cancelled: false,
        }
    }
}

impl LocationSubscription {
    pub async fn next_update(&mut self) -> Option<GeoPoint> {
        if self.cancelled {
            return None;
        }

        self.rx.changed().await.ok()?;
        let update = self.rx.borrow_and_update().clone();
        Some(update)
    }

    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }

        self.task.abort();
        self.cancelled = true;
    }

    pub fn into_stream(self) -> WatchStream<GeoPoint> {
        WatchStream::from_changes(self.rx)
    }
}
