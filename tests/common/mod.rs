#![allow(dead_code)]

use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use chrono::{DateTime, Local, TimeZone};
use pegel::{
    clock::ManualClock, AppState, Config, DataStore, Haptics, MemoryBackend, PreferenceBackend,
    Preferences, StoreError,
};

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, min, s).single().unwrap()
}

/// In-memory app with a hand-driven clock.
pub fn app_at(now: DateTime<Local>) -> (AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(now));
    let app = AppState::with_stores(
        Config::with_data_dir("/nonexistent/pegel"),
        DataStore::in_memory("drink_logs"),
        DataStore::in_memory("active_drinks_preferences"),
        clock.clone(),
    );
    (app, clock)
}

/// Memory backend whose reads and writes can be switched off.
#[derive(Default, Clone)]
pub struct FlakyBackend {
    inner: Arc<MemoryBackend>,
    pub fail_reads: Arc<AtomicBool>,
    pub fail_writes: Arc<AtomicBool>,
}

impl PreferenceBackend for FlakyBackend {
    fn load(&self) -> Result<Preferences, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read refused").into());
        }
        self.inner.load()
    }

    fn save(&self, preferences: &Preferences) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
        }
        self.inner.save(preferences)
    }
}

/// Memory backend that takes `delay` for every read and write.
#[derive(Default, Clone)]
pub struct SlowBackend {
    inner: Arc<MemoryBackend>,
    pub delay: Duration,
}

impl SlowBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: Arc::default(),
            delay,
        }
    }
}

impl PreferenceBackend for SlowBackend {
    fn load(&self) -> Result<Preferences, StoreError> {
        std::thread::sleep(self.delay);
        self.inner.load()
    }

    fn save(&self, preferences: &Preferences) -> Result<(), StoreError> {
        std::thread::sleep(self.delay);
        self.inner.save(preferences)
    }
}

#[derive(Default)]
pub struct RecordingHaptics(pub Mutex<Vec<Duration>>);

impl RecordingHaptics {
    pub fn pulses(&self) -> Vec<Duration> {
        self.0.lock().unwrap().clone()
    }
}

impl Haptics for RecordingHaptics {
    fn vibrate(&self, duration: Duration) {
        self.0.lock().unwrap().push(duration);
    }
}
