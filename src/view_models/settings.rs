use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    active_drinks::ActiveDrinksStore,
    error::StoreError,
    feedback::TileUpdater,
    structs::{
        active_drinks::{self, default_active_drinks, MAX_ACTIVE_DRINKS, MIN_ACTIVE_DRINKS},
        drink_type::DrinkType,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsUiState {
    pub all_drinks: Vec<DrinkItem>,
    pub active_count: usize,
    pub has_changes: bool,
    pub validation_message: Option<String>,
    pub is_loading: bool,
}

impl Default for SettingsUiState {
    fn default() -> Self {
        Self {
            all_drinks: Vec::new(),
            active_count: 0,
            has_changes: false,
            validation_message: None,
            is_loading: true,
        }
    }
}

/// One row of the settings list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrinkItem {
    pub drink_type: DrinkType,
    pub is_active: bool,
    /// Position in the active list, `None` when inactive
    pub order: Option<usize>,
}

/// Edits a working copy of the active drinks; nothing is stored until [`Self::save_changes`].
pub struct SettingsViewModel {
    store: ActiveDrinksStore,
    tile_updater: Arc<dyn TileUpdater>,
    original: Vec<DrinkType>,
    working: Vec<DrinkType>,
    state: watch::Sender<SettingsUiState>,
}

impl SettingsViewModel {
    pub fn new(store: ActiveDrinksStore, tile_updater: Arc<dyn TileUpdater>) -> Self {
        let (state, _) = watch::channel(SettingsUiState::default());
        Self {
            store,
            tile_updater,
            original: Vec::new(),
            working: Vec::new(),
            state,
        }
    }

    /// Seeds the working copy from the committed list.
    pub fn load(&mut self) {
        let committed = self.store.current().unwrap_or_else(|e| {
            warn!("Unable to read active drinks, editing the defaults: {e}");
            default_active_drinks()
        });

        self.original = committed.clone();
        self.working = committed;
        self.publish();
    }

    pub fn subscribe(&self) -> watch::Receiver<SettingsUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SettingsUiState {
        self.state.borrow().clone()
    }

    /// Working copy, in order.
    pub fn active_drinks(&self) -> &[DrinkType] {
        &self.working
    }

    /// Flips `drink_type` in the working copy; newly activated drinks go last.
    ///
    /// Refuses with a validation message instead of dropping below one or exceeding five.
    pub fn toggle_drink(&mut self, drink_type: DrinkType) -> bool {
        let next = if self.working.contains(&drink_type) {
            active_drinks::without(&self.working, drink_type).ok_or_else(|| {
                format!("At least {MIN_ACTIVE_DRINKS} drink must be active")
            })
        } else {
            active_drinks::with_added(&self.working, drink_type)
                .ok_or_else(|| format!("Maximum {MAX_ACTIVE_DRINKS} drinks allowed"))
        };

        match next {
            Ok(next) => {
                self.working = next;
                self.publish();
                true
            }
            Err(message) => {
                debug!("Refusing to toggle {drink_type}: {message}");
                self.state
                    .send_modify(|state| state.validation_message = Some(message));
                false
            }
        }
    }

    /// Moves the active drink at `from` to `to`. Out-of-range indices are ignored.
    pub fn reorder_drinks(&mut self, from: usize, to: usize) -> bool {
        match active_drinks::moved(&self.working, from, to) {
            Some(next) => {
                self.working = next;
                self.publish();
                true
            }
            None => false,
        }
    }

    /// Commits the working copy and asks the tile to refresh.
    ///
    /// On failure the working copy stays as it is and the error is shown, so saving can be
    /// retried.
    pub async fn save_changes(&mut self) -> Result<(), StoreError> {
        let drinks = self.working.clone();

        if let Err(e) = self.store.set_active(drinks.clone()).await {
            warn!("Unable to save active drinks: {e}");
            self.state
                .send_modify(|state| state.validation_message = Some(format!("Failed to save: {e}")));
            return Err(e);
        }

        self.tile_updater.request_update();
        self.original = drinks;
        self.publish();
        info!("Saved active drinks {:?}", self.original);
        Ok(())
    }

    pub fn cancel_changes(&mut self) {
        self.working = self.original.clone();
        self.publish();
    }

    pub fn clear_validation_message(&mut self) {
        self.state
            .send_modify(|state| state.validation_message = None);
    }

    /// Rebuilds the whole state from the working copy, clearing any message.
    fn publish(&self) {
        let all_drinks = DrinkType::all()
            .iter()
            .map(|&drink_type| {
                let order = self.working.iter().position(|d| *d == drink_type);
                DrinkItem {
                    drink_type,
                    is_active: order.is_some(),
                    order,
                }
            })
            .collect();

        self.state.send_replace(SettingsUiState {
            all_drinks,
            active_count: self.working.len(),
            has_changes: self.working != self.original,
            validation_message: None,
            is_loading: false,
        });
    }
}
