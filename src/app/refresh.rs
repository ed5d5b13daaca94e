use std::time::Duration;

use log::warn;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::fetch::{Asset, MarketApi};

/// Periodic refresh timer whose first tick lands one full period from now.
pub fn refresh_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Fetch the full listing. Failures are logged and reported as `None` so the
/// caller keeps whatever is on screen.
pub async fn fetch_listing(api: &dyn MarketApi) -> Option<Vec<Asset>> {
    match api.markets().await {
        Ok(data) => Some(data),
        Err(err) => {
            warn!("Refresh error: {}", err);
            None
        }
    }
}
