//! Intent flows through the item detail screen.

mod common;

use std::sync::Arc;

use common::{detail, item, wait_for, StubCatalog};
use openshelf::data::{FavoritesRepository, ItemRepository};
use openshelf::navigation::{self, NavigationEvent, Screen};
use openshelf::screens::ItemDetailController;

const ITEM_ID: &str = "metamorphosis00kafk";

fn controller(
    stub: &Arc<StubCatalog>,
    items: ItemRepository,
    favorites: FavoritesRepository,
) -> ItemDetailController<StubCatalog> {
    let (navigator, _events) = navigation::channel();
    ItemDetailController::new(ITEM_ID, Arc::clone(stub), items, favorites, navigator)
}

#[tokio::test]
async fn refresh_loads_detail_and_creator_items() {
    let stub = StubCatalog::new();
    stub.push_detail(Ok(detail(ITEM_ID, "The Metamorphosis", "Franz Kafka")));
    // The creator search returns the item itself plus one other work.
    stub.push_search(Ok(vec![
        item(ITEM_ID, "The Metamorphosis", "Franz Kafka"),
        item("trial00kafk", "The Trial", "Franz Kafka"),
    ]));

    let controller = controller(&stub, ItemRepository::new(), FavoritesRepository::new());
    let mut state = controller.state();
    controller.refresh();

    let loaded = wait_for(&mut state, |s| {
        !s.is_loading
            && s.data
                .as_ref()
                .is_some_and(|d| d.detail.is_some() && !d.by_creator.is_empty())
    })
    .await;

    let data = loaded.data.expect("data present");
    let loaded_detail = data.detail.expect("detail present");
    assert_eq!(loaded_detail.title, "The Metamorphosis");
    // "More by this creator" never includes the item being shown.
    let by_creator: Vec<&str> = data.by_creator.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(by_creator, ["trial00kafk"]);
    assert!(loaded.message.is_none());

    controller.close();
}

#[tokio::test]
async fn toggle_favorite_flips_the_status() {
    let stub = StubCatalog::new();
    stub.push_detail(Ok(detail(ITEM_ID, "The Metamorphosis", "Franz Kafka")));
    stub.push_search(Ok(Vec::new()));

    let controller = controller(&stub, ItemRepository::new(), FavoritesRepository::new());
    let mut state = controller.state();
    controller.refresh();
    wait_for(&mut state, |s| {
        s.data.as_ref().is_some_and(|d| d.detail.is_some())
    })
    .await;

    controller.toggle_favorite();
    let favorited = wait_for(&mut state, |s| {
        s.data.as_ref().is_some_and(|d| d.is_favorite)
    })
    .await;
    assert!(favorited.message.is_none());

    controller.toggle_favorite();
    wait_for(&mut state, |s| {
        !s.is_loading && s.data.as_ref().is_some_and(|d| !d.is_favorite)
    })
    .await;

    controller.close();
}

#[tokio::test]
async fn toggle_before_any_fetch_reports_a_message() {
    let stub = StubCatalog::new();
    let controller = controller(&stub, ItemRepository::new(), FavoritesRepository::new());
    let mut state = controller.state();

    // Nothing is in the local catalog yet, so there is nothing to
    // favorite.
    controller.toggle_favorite();
    let rejected = wait_for(&mut state, |s| s.message.is_some()).await;
    assert!(!rejected.is_loading);
    assert!(rejected
        .message
        .as_ref()
        .is_some_and(|m| m.text.contains("Unknown item")));

    controller.close();
}

#[tokio::test]
async fn failed_refresh_reports_a_message() {
    let stub = StubCatalog::new();
    stub.push_detail(Err(500));

    let controller = controller(&stub, ItemRepository::new(), FavoritesRepository::new());
    let mut state = controller.state();
    controller.refresh();

    let failed = wait_for(&mut state, |s| !s.is_loading && s.message.is_some()).await;
    assert!(failed.data.as_ref().is_some_and(|d| d.detail.is_none()));
    assert!(failed
        .message
        .as_ref()
        .is_some_and(|m| m.text.contains("500")));

    controller.close();
}

#[tokio::test]
async fn open_search_by_creator_navigates_with_the_creator() {
    let stub = StubCatalog::new();
    stub.push_detail(Ok(detail(ITEM_ID, "The Metamorphosis", "Franz Kafka")));
    stub.push_search(Ok(Vec::new()));

    let items = ItemRepository::new();
    let favorites = FavoritesRepository::new();
    let (navigator, mut events) = navigation::channel();
    let controller = ItemDetailController::new(
        ITEM_ID,
        Arc::clone(&stub),
        items,
        favorites,
        navigator,
    );
    let mut state = controller.state();

    // Before the detail is known there is no creator to search for.
    controller.open_search_by_creator();
    assert!(events.try_recv().is_err());

    controller.refresh();
    wait_for(&mut state, |s| {
        s.data.as_ref().is_some_and(|d| d.detail.is_some())
    })
    .await;

    controller.open_search_by_creator();
    assert_eq!(
        events.try_recv().expect("event queued"),
        NavigationEvent::Navigate(Screen::Search {
            keyword: "Franz Kafka".to_string()
        })
    );

    controller.close();
}

#[tokio::test]
async fn a_visit_feeds_the_recent_row() {
    let stub = StubCatalog::new();
    stub.push_detail(Ok(detail(ITEM_ID, "The Metamorphosis", "Franz Kafka")));
    stub.push_search(Ok(Vec::new()));

    let items = ItemRepository::new();
    let controller = controller(&stub, items.clone(), FavoritesRepository::new());
    let mut state = controller.state();
    controller.refresh();
    wait_for(&mut state, |s| {
        !s.is_loading && s.data.as_ref().is_some_and(|d| d.detail.is_some())
    })
    .await;

    let mut homepage_rx = items.observe_homepage();
    let homepage = wait_for(&mut homepage_rx, |h| !h.recent.is_empty()).await;
    let recent: Vec<&str> = homepage.recent.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(recent, [ITEM_ID]);

    controller.close();
}
