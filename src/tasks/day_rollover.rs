use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use tracing::{instrument, trace};

use crate::drink_log::DrinkLogStore;

/// Grace period after midnight so the local date has surely turned when we wake.
const ROLLOVER_MARGIN: Duration = Duration::from_secs(1);

/// Fallback wait when the next midnight does not exist locally (DST gap at 00:00).
const FALLBACK_WAIT: Duration = Duration::from_secs(60 * 60);

pub fn spawn(log: DrinkLogStore) -> JoinHandle<()> {
    tokio::task::spawn(day_rollover_task(log))
}

/// Re-emits every "today" stream shortly after each local midnight.
///
/// Without a write nothing would wake the streams, and a screen left open overnight would
/// keep showing yesterday's drinks.
#[instrument(skip(log))]
pub async fn day_rollover_task(log: DrinkLogStore) {
    loop {
        let wait = until_next_midnight(log.clock().now()) + ROLLOVER_MARGIN;
        trace!("Next day rollover in {} seconds", wait.as_secs());

        tokio::time::sleep(wait).await;

        trace!("Local date rolled over, refreshing today's views");
        log.refresh();
    }
}

pub fn until_next_midnight(now: DateTime<Local>) -> Duration {
    let next_midnight = now
        .date_naive()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .and_then(|midnight| midnight.and_local_timezone(Local).earliest());

    match next_midnight {
        Some(midnight) => (midnight - now).to_std().unwrap_or(Duration::ZERO),
        None => FALLBACK_WAIT,
    }
}
