//! Home-screen tile.
//!
//! Unlike the app screens the tile never subscribes to anything: each layout request takes a
//! one-shot snapshot of today's total and the active drinks, renders, and forgets.

pub mod action;

use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    active_drinks::ActiveDrinksStore,
    config::Config,
    drink_log::DrinkLogStore,
    error::StoreError,
    structs::{active_drinks::default_active_drinks, drink_type::DrinkType},
};

pub use action::{TapOutcome, TileActionReceiver};

pub const RESOURCES_VERSION: &str = "1";

/// Zero means the host must ask again after every interaction.
pub const FRESHNESS_INTERVAL_MILLIS: u64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub resources_version: &'static str,
    pub freshness_interval_millis: u64,
    pub layout: TileLayout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayout {
    pub header: String,
    pub rows: Vec<Vec<TileButton>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileButton {
    /// Clickable id, `action_<name>`
    pub id: String,
    pub drink_type: DrinkType,
    pub label: &'static str,
    /// Handed back to [`TileActionReceiver::on_launch`] when tapped
    pub payload: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    pub version: &'static str,
    pub image_ids: Vec<String>,
}

pub fn action_id(drink_type: DrinkType) -> String {
    format!("action_{}", drink_type.name().to_lowercase())
}

/// How many buttons go in each row for `count` active drinks.
pub fn row_sizes(count: usize) -> Vec<usize> {
    match count {
        0 => vec![],
        1 => vec![1],
        2 => vec![2],
        3 => vec![2, 1],
        4 => vec![2, 2],
        5 => vec![3, 2],
        n => {
            let mut sizes = vec![3; n / 3];
            if n % 3 != 0 {
                sizes.push(n % 3);
            }
            sizes
        }
    }
}

pub fn layout(total_today: usize, active: &[DrinkType]) -> TileLayout {
    let mut drinks = active.iter().copied();
    let rows = row_sizes(active.len())
        .into_iter()
        .map(|size| {
            drinks
                .by_ref()
                .take(size)
                .map(|drink_type| TileButton {
                    id: action_id(drink_type),
                    drink_type,
                    label: drink_type.emoji(),
                    payload: drink_type.name(),
                })
                .collect()
        })
        .collect();

    TileLayout {
        header: format!("Today: {total_today}"),
        rows,
    }
}

pub struct DrinkTileService {
    log: DrinkLogStore,
    active: ActiveDrinksStore,
    snapshot_timeout: Duration,
}

impl DrinkTileService {
    pub fn new(log: DrinkLogStore, active: ActiveDrinksStore, config: &Config) -> Self {
        Self {
            log,
            active,
            snapshot_timeout: config.tile_snapshot_timeout,
        }
    }

    /// Today's total and the active drinks, or `(0, defaults)` if the read fails or is slow.
    pub async fn snapshot(&self) -> (usize, Vec<DrinkType>) {
        let log = self.log.clone();
        let active = self.active.clone();
        let read = tokio::task::spawn_blocking(move || -> Result<_, StoreError> {
            Ok((log.total_today()?, active.current()?))
        });

        match tokio::time::timeout(self.snapshot_timeout, read).await {
            Ok(Ok(Ok(snapshot))) => snapshot,
            Ok(Ok(Err(e))) => {
                warn!("Tile snapshot failed, rendering defaults: {e}");
                (0, default_active_drinks())
            }
            Ok(Err(e)) => {
                warn!("Tile snapshot task failed, rendering defaults: {e}");
                (0, default_active_drinks())
            }
            Err(_) => {
                warn!(
                    "Tile snapshot took over {}ms, rendering defaults",
                    self.snapshot_timeout.as_millis()
                );
                (0, default_active_drinks())
            }
        }
    }

    pub async fn on_tile_request(&self) -> Tile {
        let (total, active) = self.snapshot().await;
        debug!("Rendering tile with {total} drink(s) and {} button(s)", active.len());

        Tile {
            resources_version: RESOURCES_VERSION,
            freshness_interval_millis: FRESHNESS_INTERVAL_MILLIS,
            layout: layout(total, &active),
        }
    }

    /// Glyphs are inline text, so there is nothing to ship.
    pub fn on_tile_resources_request(&self) -> Resources {
        Resources {
            version: RESOURCES_VERSION,
            image_ids: Vec::new(),
        }
    }
}
