use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::{
    active_drinks::{self, ActiveDrinksStore},
    clock::{Clock, SystemClock},
    config::Config,
    drink_log::{self, DrinkLogStore},
    feedback::{Haptics, TileUpdater},
    storage::DataStore,
    tasks::day_rollover,
    tile::{DrinkTileService, TileActionReceiver},
    view_models::{MainViewModel, SettingsViewModel},
};

/// Both stores, opened once and shared by every surface.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub drink_log: DrinkLogStore,
    pub active_drinks: ActiveDrinksStore,
}

impl AppState {
    /// Opens the on-disk stores under `config.data_dir`.
    pub fn open(config: Config) -> Self {
        info!("Data path: {:?}", config.data_dir);

        let drinks = DataStore::open(&config.data_dir, drink_log::DATASTORE_NAME);
        let active = DataStore::open(&config.data_dir, active_drinks::DATASTORE_NAME);
        Self::with_stores(config, drinks, active, Arc::new(SystemClock))
    }

    pub fn with_stores(
        config: Config,
        drinks: DataStore,
        active: DataStore,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            drink_log: DrinkLogStore::new(drinks, clock),
            active_drinks: ActiveDrinksStore::new(active),
        }
    }

    pub fn main_view_model(&self) -> MainViewModel {
        MainViewModel::new(self.drink_log.clone())
    }

    /// A settings view-model already seeded from the committed list.
    pub fn settings_view_model(&self, tile_updater: Arc<dyn TileUpdater>) -> SettingsViewModel {
        let mut vm = SettingsViewModel::new(self.active_drinks.clone(), tile_updater);
        vm.load();
        vm
    }

    pub fn tile_service(&self) -> DrinkTileService {
        DrinkTileService::new(
            self.drink_log.clone(),
            self.active_drinks.clone(),
            &self.config,
        )
    }

    pub fn tile_action_receiver(
        &self,
        haptics: Arc<dyn Haptics>,
        tile_updater: Arc<dyn TileUpdater>,
    ) -> TileActionReceiver {
        TileActionReceiver::new(self.drink_log.clone(), haptics, tile_updater, &self.config)
    }

    pub fn spawn_day_rollover(&self) -> JoinHandle<()> {
        day_rollover::spawn(self.drink_log.clone())
    }
}
