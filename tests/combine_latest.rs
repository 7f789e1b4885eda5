mod common;

use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::{UnboundedReceiverStream, WatchStream};

use common::wait_for;
use openshelf::state::{
    combine_view_state, state_in, CombineLatest2, CombineLatest3, LoadingCounter, MessageQueue,
    ScreenData, ScreenScope, ViewState,
};

fn unbounded<T>() -> (mpsc::UnboundedSender<T>, UnboundedReceiverStream<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}

#[tokio::test]
async fn no_emission_until_every_input_has_emitted() {
    let (a_tx, a) = unbounded::<i32>();
    let (b_tx, b) = unbounded::<&'static str>();
    let (c_tx, c) = unbounded::<bool>();
    let mut combined = CombineLatest3::new(a, b, c);

    a_tx.send(1).expect("send a");
    b_tx.send("x").expect("send b");
    // Two of three inputs seen: the join must not fire yet.
    let early = tokio::time::timeout(Duration::from_millis(50), combined.next()).await;
    assert!(early.is_err());

    c_tx.send(true).expect("send c");
    assert_eq!(combined.next().await, Some((1, "x", true)));
}

#[tokio::test]
async fn each_input_change_emits_with_latest_of_the_others() {
    let (a_tx, a) = unbounded::<i32>();
    let (b_tx, b) = unbounded::<&'static str>();
    let mut combined = CombineLatest2::new(a, b);

    a_tx.send(1).expect("send a");
    b_tx.send("x").expect("send b");
    assert_eq!(combined.next().await, Some((1, "x")));

    a_tx.send(2).expect("send a");
    assert_eq!(combined.next().await, Some((2, "x")));

    b_tx.send("y").expect("send b");
    assert_eq!(combined.next().await, Some((2, "y")));
}

#[tokio::test]
async fn seeded_inputs_emit_immediately() {
    let (_a_tx, a_rx) = watch::channel(10);
    let (_b_tx, b_rx) = watch::channel("seed");
    let mut combined = CombineLatest2::new(WatchStream::new(a_rx), WatchStream::new(b_rx));

    // Watch inputs carry a current value, so the first combined value
    // needs no further sends.
    assert_eq!(combined.next().await, Some((10, "seed")));
}

#[tokio::test]
async fn completes_when_all_inputs_complete() {
    let (a_tx, a) = unbounded::<i32>();
    let (b_tx, b) = unbounded::<i32>();
    let mut combined = CombineLatest2::new(a, b);

    a_tx.send(1).expect("send a");
    b_tx.send(2).expect("send b");
    assert_eq!(combined.next().await, Some((1, 2)));

    drop(a_tx);
    drop(b_tx);
    assert_eq!(combined.next().await, None);
}

#[tokio::test]
async fn completes_without_emitting_when_an_input_ends_unseen() {
    let (a_tx, a) = unbounded::<i32>();
    let (b_tx, b) = unbounded::<i32>();
    let mut combined = CombineLatest2::new(a, b);

    a_tx.send(1).expect("send a");
    // The second input ends before ever emitting: the join can never
    // fire, so the combined stream ends empty.
    drop(b_tx);
    assert_eq!(combined.next().await, None);
}

#[derive(Debug, Clone, PartialEq)]
struct Names(Vec<String>);

impl ScreenData for Names {}

#[tokio::test]
async fn view_state_reflects_each_input_change() {
    let (data_tx, data_rx) = watch::channel(None::<Names>);
    let loading = LoadingCounter::new();
    let messages = MessageQueue::new();

    let snapshots = combine_view_state(
        WatchStream::new(data_rx),
        WatchStream::new(loading.observe()),
        WatchStream::new(messages.observe()),
        |data, is_loading, message| ViewState {
            data,
            is_loading,
            message,
        },
    );
    let scope = ScreenScope::new();
    let mut state = state_in(&scope, snapshots, ViewState::default());

    let names = Names(vec!["a".to_string(), "b".to_string()]);
    data_tx.send(Some(names.clone())).expect("send data");
    let snapshot = wait_for(&mut state, |s| s.data.is_some()).await;
    assert_eq!(snapshot.data, Some(names.clone()));
    assert!(!snapshot.is_loading);
    assert!(snapshot.message.is_none());

    loading.increment();
    let snapshot = wait_for(&mut state, |s| s.is_loading).await;
    assert_eq!(snapshot.data, Some(names.clone()));

    // The operation fails: loading clears, a message appears, the data
    // from the last success stays.
    loading.decrement();
    let id = messages.enqueue("fetch failed");
    let snapshot = wait_for(&mut state, |s| !s.is_loading && s.message.is_some()).await;
    assert_eq!(snapshot.data, Some(names.clone()));
    assert_eq!(snapshot.message.as_ref().map(|m| m.id), Some(id));

    messages.dismiss(id);
    let snapshot = wait_for(&mut state, |s| s.message.is_none()).await;
    assert_eq!(snapshot.data, Some(names));

    scope.close();
}

#[tokio::test]
async fn state_in_stops_tracking_when_the_scope_closes() {
    let scope = ScreenScope::new();
    let (tx, rx) = watch::channel(0);
    let mut cell = state_in(&scope, WatchStream::new(rx), -1);

    tx.send(5).expect("send");
    wait_for(&mut cell, |v| *v == 5).await;

    scope.close();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Updates after teardown never reach the cell. (The collection task
    // has dropped its subscription, so publish without a receiver
    // check.)
    tx.send_replace(9);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(*cell.borrow(), 5);
}
