//! Drink tally for a wrist watch.
//!
//! Two preference-backed stores hold the state: the full history of logged drinks and the
//! user's ordered quick-access drinks. View-models and the home-screen tile sit on top and are
//! all built from one [`AppState`].

pub mod active_drinks;
pub mod app_state;
pub mod clock;
pub mod config;
pub mod drink_log;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod storage;
pub mod structs;
pub mod tasks;
pub mod tile;
pub mod view_models;

pub use active_drinks::ActiveDrinksStore;
pub use app_state::AppState;
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use drink_log::{DrinkCounts, DrinkLogStore};
pub use error::{ActiveListError, StoreError};
pub use feedback::{Haptics, NoHaptics, TileRefreshSignal, TileUpdater};
pub use storage::{DataStore, FileBackend, MemoryBackend, PreferenceBackend, Preferences};
pub use structs::{drink_event::DrinkEvent, drink_type::DrinkType};
pub use tile::{DrinkTileService, TapOutcome, Tile, TileActionReceiver};
pub use view_models::{MainViewModel, SettingsViewModel};
