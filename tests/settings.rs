mod common;

use std::{
    sync::{atomic::Ordering, Arc},
    time::{Duration, Instant},
};

use common::{local, FlakyBackend, SlowBackend};
use futures::StreamExt;
use pegel::{
    clock::ManualClock, ActiveDrinksStore, AppState, Config, DataStore, DrinkType,
    TileRefreshSignal,
};

use DrinkType::*;

fn app_with(active: FlakyBackend) -> AppState {
    AppState::with_stores(
        Config::with_data_dir("/nonexistent/pegel"),
        DataStore::in_memory("drink_logs"),
        DataStore::new("active_drinks_preferences", active),
        Arc::new(ManualClock::new(local(2024, 6, 1, 20, 0, 0))),
    )
}

#[tokio::test]
async fn failed_save_keeps_working_copy_for_retry() {
    let backend = FlakyBackend::default();
    let app = app_with(backend.clone());
    let mut vm = app.settings_view_model(Arc::new(TileRefreshSignal::new()));

    assert!(vm.toggle_drink(Wine));
    assert!(vm.reorder_drinks(0, 3));
    let edited = vm.active_drinks().to_vec();
    assert_eq!(edited, vec![Shot, Cocktail, LongDrink, Beer]);

    backend.fail_writes.store(true, Ordering::SeqCst);
    assert!(vm.save_changes().await.is_err());

    let state = vm.state();
    assert!(state
        .validation_message
        .as_deref()
        .is_some_and(|m| m.starts_with("Failed to save: ")));
    assert!(state.has_changes);
    assert_eq!(vm.active_drinks(), edited.as_slice());
    assert_eq!(
        app.active_drinks.current().unwrap(),
        vec![Beer, Wine, Shot, Cocktail, LongDrink]
    );

    backend.fail_writes.store(false, Ordering::SeqCst);
    vm.save_changes().await.unwrap();
    assert_eq!(app.active_drinks.current().unwrap(), edited);
    assert_eq!(vm.state().validation_message, None);
}

#[tokio::test]
async fn saved_order_reaches_observers_and_tile() {
    let app = app_with(FlakyBackend::default());
    let mut active = app.active_drinks.observe_active();
    assert_eq!(active.next().await.unwrap().len(), 5);

    let mut vm = app.settings_view_model(Arc::new(TileRefreshSignal::new()));
    for drink in [Beer, Wine, Shot, Cocktail] {
        assert!(vm.toggle_drink(drink));
    }
    assert!(!vm.toggle_drink(LongDrink));
    assert!(vm.toggle_drink(VodkaTower));
    vm.save_changes().await.unwrap();

    assert_eq!(active.next().await, Some(vec![LongDrink, VodkaTower]));

    let tile = app.tile_service().on_tile_request().await;
    let labels: Vec<&str> = tile.layout.rows.iter().flatten().map(|b| b.label).collect();
    assert_eq!(labels, vec!["🍹", "🍸🗼"]);
}

#[tokio::test]
async fn watch_channel_publishes_edits() {
    let app = app_with(FlakyBackend::default());
    let mut vm = app.settings_view_model(Arc::new(TileRefreshSignal::new()));
    let mut state = vm.subscribe();
    state.borrow_and_update();

    assert!(!vm.toggle_drink(BeerTower));
    assert!(state.has_changed().unwrap());
    assert_eq!(
        state.borrow_and_update().validation_message.as_deref(),
        Some("Maximum 5 drinks allowed")
    );

    vm.cancel_changes();
    assert!(state.borrow_and_update().validation_message.is_none());
}

#[tokio::test]
async fn slow_storage_does_not_stall_active_drink_reads_or_edits() {
    let active = ActiveDrinksStore::new(DataStore::new(
        "active_drinks_preferences",
        SlowBackend::new(Duration::from_millis(300)),
    ));

    let started = Instant::now();
    let mut stream = active.observe_active();
    let observed = tokio::time::timeout(Duration::from_millis(50), stream.next()).await;
    assert!(observed.is_err());

    let added = tokio::time::timeout(Duration::from_millis(50), active.add(VodkaTower)).await;
    assert!(added.is_err());
    assert!(started.elapsed() < Duration::from_millis(250));

    // The interrupted stream picks up where it left off
    assert_eq!(stream.next().await.unwrap().len(), 5);
    assert!(active.remove(Beer).await.unwrap());
    assert_eq!(active.load().await.unwrap(), vec![Wine, Shot, Cocktail, LongDrink]);
}
