use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, trace, warn};

use crate::error::StoreError;

/// Contents of one data store: string keys mapped to string blobs.
pub type Preferences = BTreeMap<String, String>;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Durable home of a data store's preference map.
pub trait PreferenceBackend: Send + Sync {
    fn load(&self) -> Result<Preferences, StoreError>;
    fn save(&self, preferences: &Preferences) -> Result<(), StoreError>;
}

/// One JSON object per data store, at `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            path: dir.join(format!("{name}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceBackend for FileBackend {
    fn load(&self) -> Result<Preferences, StoreError> {
        if !self.path.try_exists()? {
            return Ok(Preferences::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn save(&self, preferences: &Preferences) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        // Write next to the target and rename over it so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(preferences)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend(Mutex<Preferences>);

impl PreferenceBackend for MemoryBackend {
    fn load(&self) -> Result<Preferences, StoreError> {
        Ok(self.0.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, preferences: &Preferences) -> Result<(), StoreError> {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = preferences.clone();
        Ok(())
    }
}

struct Inner {
    name: String,
    backend: Box<dyn PreferenceBackend>,
    write_lock: Mutex<()>,
    changes: broadcast::Sender<()>,
}

impl Inner {
    fn load_or_empty(&self) -> Result<Preferences, StoreError> {
        match self.backend.load() {
            Err(StoreError::Corrupt { path, reason }) => {
                warn!("[{}] Ignoring corrupted preference file {path}: {reason}", self.name);
                Ok(Preferences::new())
            }
            other => other,
        }
    }

    fn edit_blocking<F>(&self, transform: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Preferences) -> Result<(), StoreError>,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut preferences = self.load_or_empty()?;
        transform(&mut preferences)?;
        self.backend.save(&preferences)?;

        debug!("[{}] Committed {} key(s)", self.name, preferences.len());
        // No subscribers is fine
        let _ = self.changes.send(());
        Ok(())
    }
}

/// Handle to one preference data store.
///
/// Construct it once per store and clone the handle into every consumer. All writes go
/// through [`DataStore::edit`], which serializes read-modify-write cycles so there is at most
/// one write in flight per store; the last committed write wins.
#[derive(Clone)]
pub struct DataStore(Arc<Inner>);

impl DataStore {
    pub fn new(name: impl Into<String>, backend: impl PreferenceBackend + 'static) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self(Arc::new(Inner {
            name: name.into(),
            backend: Box::new(backend),
            write_lock: Mutex::new(()),
            changes,
        }))
    }

    pub fn open(dir: &Path, name: &str) -> Self {
        Self::new(name, FileBackend::new(dir, name))
    }

    pub fn in_memory(name: &str) -> Self {
        Self::new(name, MemoryBackend::default())
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Current contents, read on the calling thread. A corrupted file reads as empty; I/O
    /// failures propagate.
    pub fn data(&self) -> Result<Preferences, StoreError> {
        self.0.load_or_empty()
    }

    /// [`DataStore::data`] on the blocking pool, so a slow backend never stalls the runtime.
    pub async fn load(&self) -> Result<Preferences, StoreError> {
        let inner = Arc::clone(&self.0);
        tokio::task::spawn_blocking(move || inner.load_or_empty()).await?
    }

    /// Like [`DataStore::load`] but never fails.
    pub async fn load_snapshot(&self) -> Preferences {
        self.load().await.unwrap_or_else(|e| {
            warn!("[{}] Unable to read preferences: {e}", self.0.name);
            Preferences::new()
        })
    }

    /// Applies `transform` to the stored map and commits the result, then notifies observers.
    ///
    /// The write runs on the blocking pool as its own task, so it completes even when the
    /// caller stops waiting for it.
    pub async fn edit<F>(&self, transform: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Preferences) + Send + 'static,
    {
        self.try_edit(move |preferences| {
            transform(preferences);
            Ok(())
        })
        .await
    }

    /// Fallible [`DataStore::edit`]: nothing is written when `transform` returns an error.
    pub async fn try_edit<F>(&self, transform: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Preferences) -> Result<(), StoreError> + Send + 'static,
    {
        let inner = Arc::clone(&self.0);
        tokio::task::spawn_blocking(move || inner.edit_blocking(transform)).await??;
        Ok(())
    }

    /// Wakes every observer without writing anything.
    pub fn notify(&self) {
        trace!("[{}] Re-emitting to observers", self.0.name);
        let _ = self.0.changes.send(());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.0.changes.subscribe()
    }

    /// Stream of `map(preferences)`: once on subscription, then after every change.
    ///
    /// The map runs against a fresh read on each emission, never a cached value.
    pub fn observe<T, F>(&self, map: F) -> BoxStream<'static, T>
    where
        T: Send + 'static,
        F: Fn(&Preferences) -> T + Send + Sync + 'static,
    {
        let map = Arc::new(map);
        let state = (self.clone(), self.subscribe(), true);

        stream::unfold(state, move |(store, mut changes, first)| {
            let map = Arc::clone(&map);
            async move {
                if !first {
                    match changes.recv().await {
                        Ok(()) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            trace!("[{}] Observer skipped {skipped} change(s)", store.name());
                        }
                        Err(RecvError::Closed) => return None,
                    }
                }

                let value = map(&store.load_snapshot().await);
                Some((value, (store, changes, false)))
            }
        })
        .boxed()
    }
}
