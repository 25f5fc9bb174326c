use futures::stream::BoxStream;
use tracing::{debug, info};

use crate::{
    error::StoreError,
    storage::{DataStore, Preferences},
    structs::{
        active_drinks::{self, default_active_drinks},
        drink_type::DrinkType,
    },
};

pub const DATASTORE_NAME: &str = "active_drinks_preferences";
pub const ACTIVE_DRINKS_KEY: &str = "active_drinks_order";

fn decode_active(preferences: &Preferences) -> Vec<DrinkType> {
    active_drinks::decode(preferences.get(ACTIVE_DRINKS_KEY).map(String::as_str))
}

/// The user's ordered quick-access drinks, 1 to 5 of them, no repeats.
///
/// [`ActiveDrinksStore::set_active`] is the only path to storage; every other mutation builds
/// the next list and goes through it.
#[derive(Clone)]
pub struct ActiveDrinksStore {
    store: DataStore,
}

impl ActiveDrinksStore {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    pub fn data_store(&self) -> &DataStore {
        &self.store
    }

    /// Committed list, or the defaults when nothing usable is stored.
    ///
    /// Reads the backend on the calling thread; async code uses [`ActiveDrinksStore::load`].
    pub fn current(&self) -> Result<Vec<DrinkType>, StoreError> {
        Ok(decode_active(&self.store.data()?))
    }

    /// [`ActiveDrinksStore::current`] without blocking the runtime.
    pub async fn load(&self) -> Result<Vec<DrinkType>, StoreError> {
        Ok(decode_active(&self.store.load().await?))
    }

    pub fn observe_active(&self) -> BoxStream<'static, Vec<DrinkType>> {
        self.store.observe(decode_active)
    }

    pub async fn set_active(&self, drinks: Vec<DrinkType>) -> Result<(), StoreError> {
        active_drinks::validate(&drinks)?;

        let raw = active_drinks::encode(&drinks)?;
        self.store
            .edit(move |preferences| {
                preferences.insert(ACTIVE_DRINKS_KEY.to_string(), raw);
            })
            .await?;

        debug!("Active drinks set to {drinks:?}");
        Ok(())
    }

    pub fn is_active(&self, drink_type: DrinkType) -> Result<bool, StoreError> {
        Ok(self.current()?.contains(&drink_type))
    }

    pub async fn reset_to_defaults(&self) -> Result<(), StoreError> {
        self.set_active(default_active_drinks()).await?;
        info!("Active drinks reset to defaults");
        Ok(())
    }

    /// Appends `drink_type`. `Ok(false)` when it is already active or five are active.
    pub async fn add(&self, drink_type: DrinkType) -> Result<bool, StoreError> {
        match active_drinks::with_added(&self.load().await?, drink_type) {
            Some(next) => self.set_active(next).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Removes `drink_type`. `Ok(false)` when it is not active or is the only one left.
    pub async fn remove(&self, drink_type: DrinkType) -> Result<bool, StoreError> {
        match active_drinks::without(&self.load().await?, drink_type) {
            Some(next) => self.set_active(next).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Moves `drink_type` to `position`, shifting the drinks in between.
    pub async fn move_to_position(
        &self,
        drink_type: DrinkType,
        position: usize,
    ) -> Result<bool, StoreError> {
        match active_drinks::moved_drink(&self.load().await?, drink_type, position) {
            Some(next) => self.set_active(next).await.map(|()| true),
            None => Ok(false),
        }
    }
}
