use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use tracing::Level;

use crate::error::StoreError;

pub const DEFAULT_TILE_SNAPSHOT_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_TILE_TAP_TIMEOUT: Duration = Duration::from_millis(800);
pub const DEFAULT_VIBRATION: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the preference data stores live
    pub data_dir: PathBuf,

    pub log_dir: PathBuf,

    /// Upper bound on the tile's one-shot read before it renders fallbacks
    pub tile_snapshot_timeout: Duration,

    /// How long a tile tap waits for its write before reporting failure
    pub tile_tap_timeout: Duration,

    /// Length of the haptic pulse after a tile tap
    pub vibration: Duration,

    pub log_level: Level,
}

impl Config {
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_dir: dir.to_path_buf(),
            log_dir: dir.join("logs"),
            tile_snapshot_timeout: DEFAULT_TILE_SNAPSHOT_TIMEOUT,
            tile_tap_timeout: DEFAULT_TILE_TAP_TIMEOUT,
            vibration: DEFAULT_VIBRATION,
            log_level: Level::INFO,
        }
    }

    /// Platform data and log directories for the app.
    pub fn from_project_dirs() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("com", "pegel", "pegel").ok_or(StoreError::NoProjectDir)?;

        Ok(Self {
            log_dir: dirs.data_local_dir().join("logs"),
            ..Self::with_data_dir(dirs.data_dir())
        })
    }
}
