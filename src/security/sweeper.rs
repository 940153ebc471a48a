//! Background eviction of expired admission state.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

use super::anomaly::AnomalyFlagger;
use super::clock::Clock;
use super::rate_limiter::RateLimiter;

/// Periodically sweeps expired rate windows and stale suspicion records.
///
/// Runs until the task is aborted. Each sweep only holds one map shard at a
/// time, so request admission keeps flowing while it runs.
pub async fn run_sweeper(
    rate_limiter: Arc<RateLimiter>,
    anomaly_flagger: Arc<AnomalyFlagger>,
    clock: Arc<dyn Clock>,
    period: Duration,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        sweep_once(&rate_limiter, &anomaly_flagger, clock.as_ref());
    }
}

/// Runs a single sweep pass. Returns `(rate_windows, suspicion_records)`
/// removed.
pub fn sweep_once(
    rate_limiter: &RateLimiter,
    anomaly_flagger: &AnomalyFlagger,
    clock: &dyn Clock,
) -> (usize, usize) {
    let now = clock.now();
    let windows = rate_limiter.sweep(now);
    let records = anomaly_flagger.sweep(now);

    if windows > 0 || records > 0 {
        tracing::debug!(
            rate_windows = windows,
            suspicion_records = records,
            "Swept expired admission state"
        );
    }

    (windows, records)
}
