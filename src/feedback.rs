use std::{sync::Arc, time::Duration};

use tokio::sync::Notify;
use tracing::trace;

/// The watch's vibration motor.
pub trait Haptics: Send + Sync {
    fn vibrate(&self, duration: Duration);
}

/// Asks the tile host to request a fresh layout.
pub trait TileUpdater: Send + Sync {
    fn request_update(&self);
}

/// For hosts without a vibrator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&self, duration: Duration) {
        trace!("No vibrator, skipping {}ms pulse", duration.as_millis());
    }
}

/// A [`TileUpdater`] the host can await on.
///
/// Requests made while nobody is waiting are remembered (one permit), so a host that
/// re-renders in a loop never misses an update.
#[derive(Debug, Default, Clone)]
pub struct TileRefreshSignal(Arc<Notify>);

impl TileRefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn requested(&self) {
        self.0.notified().await;
    }
}

impl TileUpdater for TileRefreshSignal {
    fn request_update(&self) {
        trace!("Tile update requested");
        self.0.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_request_is_remembered() {
        let signal = TileRefreshSignal::new();
        signal.request_update();

        tokio::time::timeout(Duration::from_secs(1), signal.requested())
            .await
            .unwrap();
    }
}
