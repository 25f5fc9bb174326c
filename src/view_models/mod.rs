pub mod main;
pub mod settings;

pub use main::{render_log_screen, LogScreen, MainViewModel};
pub use settings::{DrinkItem, SettingsUiState, SettingsViewModel};
