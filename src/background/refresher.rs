use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::dashboard::Dashboard;

/// Start a background task that reloads the active symbol every `interval`.
///
/// Ticks where no symbol is active are skipped. Returns `None` when
/// `interval` is zero.
pub fn spawn_refresher(dashboard: Dashboard, interval: Duration) -> Option<JoinHandle<()>> {
    if interval.is_zero() {
        debug!("Background refresh disabled");
        return None;
    }

    info!(interval_secs = interval.as_secs(), "Starting background refresh");

    let handle = tokio::spawn(async move {
        let mut ticker = refresh_ticker(interval);
        // The first tick completes immediately; the initial load is done by the caller.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match dashboard.refresh().await {
                Some(snapshot) => {
                    debug!(revision = snapshot.revision, "Refreshed active symbol");
                }
                None => debug!("No active symbol to refresh"),
            }
        }
    });

    Some(handle)
}

/// A reload slower than `interval` must not be followed by catch-up reloads.
fn refresh_ticker(interval: Duration) -> Interval {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
