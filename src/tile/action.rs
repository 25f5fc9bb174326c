use std::{sync::Arc, time::Duration};

use tracing::{info, trace, warn};

use crate::{
    config::Config,
    drink_log::DrinkLogStore,
    error::StoreError,
    feedback::{Haptics, TileUpdater},
    structs::{drink_event::DrinkEvent, drink_type::DrinkType},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Missing or unknown payload
    Ignored,
    Logged(DrinkEvent),
    Failed,
}

/// Handles taps on tile buttons.
///
/// Each launch is independent: log the drink, buzz, ask for a fresh tile, and finish no matter
/// what happened along the way.
#[derive(Clone)]
pub struct TileActionReceiver {
    log: DrinkLogStore,
    haptics: Arc<dyn Haptics>,
    tile_updater: Arc<dyn TileUpdater>,
    vibration: Duration,
    tap_timeout: Duration,
}

impl TileActionReceiver {
    pub fn new(
        log: DrinkLogStore,
        haptics: Arc<dyn Haptics>,
        tile_updater: Arc<dyn TileUpdater>,
        config: &Config,
    ) -> Self {
        Self {
            log,
            haptics,
            tile_updater,
            vibration: config.vibration,
            tap_timeout: config.tile_tap_timeout,
        }
    }

    /// `payload` is the tapped button's drink name.
    ///
    /// The work runs as its own task, so the write still lands if the caller goes away before
    /// it completes or the wait times out.
    pub async fn on_launch(&self, payload: Option<&str>) -> TapOutcome {
        let Some(drink_type) = payload.and_then(DrinkType::from_name) else {
            trace!("Ignoring tile launch with payload {payload:?}");
            return TapOutcome::Ignored;
        };

        let receiver = self.clone();
        let task = tokio::spawn(async move { receiver.handle_drink_tap(drink_type).await });

        match tokio::time::timeout(self.tap_timeout, task).await {
            Ok(Ok(Ok(drink))) => TapOutcome::Logged(drink),
            Ok(Ok(Err(e))) => {
                warn!("Unable to log {drink_type} from tile: {e}");
                TapOutcome::Failed
            }
            Ok(Err(e)) => {
                warn!("Tile tap task for {drink_type} did not finish: {e}");
                TapOutcome::Failed
            }
            Err(_) => {
                warn!(
                    "Logging {drink_type} from tile took over {}ms, leaving it to finish in the background",
                    self.tap_timeout.as_millis()
                );
                TapOutcome::Failed
            }
        }
    }

    async fn handle_drink_tap(&self, drink_type: DrinkType) -> Result<DrinkEvent, StoreError> {
        let drink = self.log.append(drink_type).await?;

        self.haptics.vibrate(self.vibration);
        self.tile_updater.request_update();

        info!("Logged {drink_type} from tile");
        Ok(drink)
    }
}
