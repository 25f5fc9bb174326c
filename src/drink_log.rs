use std::{collections::BTreeMap, sync::Arc};

use chrono::NaiveDate;
use futures::stream::{BoxStream, StreamExt};
use tracing::{debug, info, warn};

use crate::{
    clock::Clock,
    error::StoreError,
    storage::{DataStore, Preferences},
    structs::{drink_event::DrinkEvent, drink_type::DrinkType},
};

pub const DATASTORE_NAME: &str = "drink_logs";
pub const DRINKS_KEY: &str = "drinks_list";

/// Drinks logged today per type. Types without a drink today are absent, never zero.
pub type DrinkCounts = BTreeMap<DrinkType, usize>;

/// Append-only history of every logged drink.
///
/// The full history is stored under one key; "today" is always a filtered view computed
/// against the clock at the moment of each read.
#[derive(Clone)]
pub struct DrinkLogStore {
    store: DataStore,
    clock: Arc<dyn Clock>,
}

fn decode_history(preferences: &Preferences) -> Vec<DrinkEvent> {
    let Some(raw) = preferences.get(DRINKS_KEY) else {
        return Vec::new();
    };

    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Unable to decode drink history, treating it as empty: {e}");
        Vec::new()
    })
}

fn filter_today(history: Vec<DrinkEvent>, clock: &dyn Clock) -> Vec<DrinkEvent> {
    let now = clock.now();
    let mut today: Vec<DrinkEvent> = history
        .into_iter()
        .filter(|d| d.is_from_today(now))
        .collect();
    today.sort_by_key(|d| d.timestamp);
    today
}

fn count_by_type(drinks: &[DrinkEvent]) -> DrinkCounts {
    let mut counts = DrinkCounts::new();
    for drink in drinks {
        *counts.entry(drink.drink_type).or_insert(0) += 1;
    }
    counts
}

impl DrinkLogStore {
    pub fn new(store: DataStore, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn data_store(&self) -> &DataStore {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Records a drink of `drink_type` at the current time.
    pub async fn append(&self, drink_type: DrinkType) -> Result<DrinkEvent, StoreError> {
        let drink = DrinkEvent::now(drink_type, self.clock.as_ref());

        self.store
            .try_edit(move |preferences| {
                let mut history = decode_history(preferences);
                history.push(drink);
                preferences.insert(DRINKS_KEY.to_string(), serde_json::to_string(&history)?);
                Ok(())
            })
            .await?;

        debug!("Logged {} at {}", drink.drink_type, drink.timestamp);
        Ok(drink)
    }

    /// Entire stored history in insertion order.
    pub fn history(&self) -> Result<Vec<DrinkEvent>, StoreError> {
        Ok(decode_history(&self.store.data()?))
    }

    pub fn today(&self) -> Result<Vec<DrinkEvent>, StoreError> {
        Ok(filter_today(self.history()?, self.clock.as_ref()))
    }

    pub fn counts_today(&self) -> Result<DrinkCounts, StoreError> {
        Ok(count_by_type(&self.today()?))
    }

    pub fn total_today(&self) -> Result<usize, StoreError> {
        Ok(self.today()?.len())
    }

    /// Total drinks per local calendar date across the whole history.
    pub fn daily_totals(&self) -> Result<BTreeMap<NaiveDate, usize>, StoreError> {
        let mut totals = BTreeMap::new();
        for drink in self.history()? {
            if let Some(date) = drink.local_date() {
                *totals.entry(date).or_insert(0) += 1;
            }
        }
        Ok(totals)
    }

    /// Today's drinks, oldest first, re-emitted on every change.
    pub fn observe_today(&self) -> BoxStream<'static, Vec<DrinkEvent>> {
        let clock = Arc::clone(&self.clock);
        self.store
            .observe(move |preferences| filter_today(decode_history(preferences), clock.as_ref()))
    }

    pub fn observe_counts_today(&self) -> BoxStream<'static, DrinkCounts> {
        self.observe_today().map(|today| count_by_type(&today)).boxed()
    }

    pub fn observe_total_today(&self) -> BoxStream<'static, usize> {
        self.observe_today().map(|today| today.len()).boxed()
    }

    /// Resets today's tally.
    ///
    /// This drops the whole stored history, not only today's drinks, matching how the watch
    /// app has always behaved.
    pub async fn reset_today(&self) -> Result<(), StoreError> {
        self.store
            .edit(|preferences| {
                preferences.remove(DRINKS_KEY);
            })
            .await?;
        info!("Drink log reset");
        Ok(())
    }

    pub async fn clear_all(&self) -> Result<(), StoreError> {
        self.store.edit(|preferences| preferences.clear()).await?;
        info!("Drink log cleared");
        Ok(())
    }

    /// Makes every "today" stream re-derive, e.g. after local midnight.
    pub fn refresh(&self) {
        self.store.notify();
    }
}
