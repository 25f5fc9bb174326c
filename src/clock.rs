use std::sync::Mutex;

use chrono::{DateTime, Local};

/// Source of wall-clock time.
///
/// "Today" is always derived from `now()` at the moment of a query, so anything that filters
/// by calendar date takes a clock instead of capturing a date up front.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
///
/// Test support: lets tests and simulations cross midnight without waiting for it. Production
/// code takes [`SystemClock`].
#[derive(Debug)]
pub struct ManualClock(Mutex<DateTime<Local>>);

impl ManualClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}
