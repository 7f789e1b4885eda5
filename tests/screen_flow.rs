//! End-to-end intent flows through the search screen.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{item, wait_for, StubCatalog};
use openshelf::data::{ItemRepository, RecentSearchRepository};
use openshelf::navigation::{self, NavigationEvent, Screen};
use openshelf::screens::{SearchController, SearchData};
use openshelf::state::ViewState;

fn result_ids(state: &ViewState<SearchData>) -> Vec<String> {
    state
        .data
        .as_ref()
        .map(|data| data.results.iter().map(|i| i.id.clone()).collect())
        .unwrap_or_default()
}

fn controller(stub: &Arc<StubCatalog>) -> SearchController<StubCatalog> {
    let (navigator, _events) = navigation::channel();
    SearchController::new(
        Arc::clone(stub),
        ItemRepository::new(),
        RecentSearchRepository::new(),
        navigator,
    )
}

#[tokio::test]
async fn search_success_failure_and_dismiss() {
    let stub = StubCatalog::new();
    stub.push_search(Ok(vec![item("a", "Amerika", "Kafka"), item("b", "Betrachtung", "Kafka")]));
    stub.push_search(Err(503));
    let controller = controller(&stub);
    let mut state = controller.state();

    // Idle before any intent.
    let initial = state.borrow().clone();
    assert!(!initial.is_loading);
    assert!(initial.message.is_none());

    // First intent: hold the catalog call so the in-flight state is
    // observable, then release it.
    let gate = stub.hold();
    controller.search("kafka");
    let loading = wait_for(&mut state, |s| s.is_loading).await;
    assert!(loading.message.is_none());
    gate.notify_one();

    let loaded = wait_for(&mut state, |s| !s.is_loading && !result_ids(s).is_empty()).await;
    assert_eq!(result_ids(&loaded), ["a", "b"]);
    assert!(loaded.message.is_none());
    let recent = loaded.data.as_ref().map(|d| d.recent_searches.clone());
    assert_eq!(recent.as_deref(), Some(["kafka".to_string()].as_slice()));

    // Second intent fails: loading clears, a message appears, and the
    // previous results stay on screen.
    controller.search("other");
    let failed = wait_for(&mut state, |s| !s.is_loading && s.message.is_some()).await;
    assert_eq!(result_ids(&failed), ["a", "b"]);

    let message = failed.message.expect("failure queued a message");
    assert!(message.text.contains("503"));
    controller.dismiss_message(message.id);
    let dismissed = wait_for(&mut state, |s| s.message.is_none()).await;
    assert_eq!(result_ids(&dismissed), ["a", "b"]);

    controller.close();
}

#[tokio::test]
async fn concurrent_searches_share_the_busy_flag() {
    let stub = StubCatalog::new();
    stub.set_delay(Duration::from_millis(50));
    stub.push_search(Ok(vec![item("a", "Amerika", "Kafka")]));
    stub.push_search(Ok(vec![item("b", "Betrachtung", "Kafka")]));
    let controller = controller(&stub);
    let mut state = controller.state();

    controller.search("first");
    controller.search("second");
    wait_for(&mut state, |s| s.is_loading).await;

    // Busy must hold until both operations have gone through.
    tokio::time::timeout(common::TIMEOUT, async {
        while stub.search_calls.lock().len() < 2 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("both searches reach the catalog");

    let settled = wait_for(&mut state, |s| !s.is_loading && !result_ids(s).is_empty()).await;
    assert!(settled.message.is_none());
    assert_eq!(stub.search_calls.lock().len(), 2);

    controller.close();
}

#[tokio::test]
async fn blank_keyword_is_rejected_with_a_message() {
    let stub = StubCatalog::new();
    let controller = controller(&stub);
    let mut state = controller.state();

    controller.search("   ");
    let rejected = wait_for(&mut state, |s| s.message.is_some()).await;
    assert!(!rejected.is_loading);
    assert_eq!(
        rejected.message.as_ref().map(|m| m.text.as_str()),
        Some("Enter a search keyword")
    );
    // Nothing was sent to the catalog.
    assert!(stub.search_calls.lock().is_empty());

    controller.close();
}

#[tokio::test]
async fn removing_a_recent_search_updates_the_list() {
    let stub = StubCatalog::new();
    stub.push_search(Ok(Vec::new()));
    stub.push_search(Ok(Vec::new()));
    let controller = controller(&stub);
    let mut state = controller.state();

    controller.search("kafka");
    controller.search("brod");
    wait_for(&mut state, |s| {
        s.data
            .as_ref()
            .is_some_and(|d| d.recent_searches.len() == 2)
    })
    .await;

    controller.remove_recent_search("kafka");
    let updated = wait_for(&mut state, |s| {
        s.data
            .as_ref()
            .is_some_and(|d| d.recent_searches == ["brod".to_string()])
    })
    .await;
    assert!(!updated.is_loading);

    controller.close();
}

#[tokio::test]
async fn open_item_pushes_a_navigation_event() {
    let stub = StubCatalog::new();
    let (navigator, mut events) = navigation::channel();
    let controller = SearchController::new(
        Arc::clone(&stub),
        ItemRepository::new(),
        RecentSearchRepository::new(),
        navigator,
    );

    controller.open_item("metamorphosis00kafk");
    assert_eq!(
        events.try_recv().expect("event queued"),
        NavigationEvent::Navigate(Screen::ItemDetail {
            item_id: "metamorphosis00kafk".to_string()
        })
    );

    controller.close();
}

#[tokio::test]
async fn close_cancels_in_flight_work_without_touching_state() {
    let stub = StubCatalog::new();
    stub.push_search(Ok(vec![item("a", "Amerika", "Kafka")]));
    let controller = controller(&stub);
    let mut state = controller.state();

    let gate = stub.hold();
    controller.search("kafka");
    wait_for(&mut state, |s| s.is_loading).await;

    controller.close();
    gate.notify_one();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The cancelled operation must not decrement a torn-down counter,
    // publish results, or queue a message.
    let last = state.borrow().clone();
    assert!(last.is_loading);
    assert!(last.message.is_none());
    assert!(result_ids(&last).is_empty());
}
