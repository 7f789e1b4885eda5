//! Combine-latest joins and stream-to-state collection.
//!
//! The joins are small explicit state machines: each holds the latest
//! value per input (the `Option`s double as the seen-once mask) and
//! emits a tuple of clones whenever any input yields, but never before
//! every input has yielded at least once. In the standard usage all
//! inputs are watch-backed and therefore seeded, so the first combined
//! value is available immediately.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_util::StreamExt;
use tokio::sync::watch;

use crate::state::message::Message;
use crate::state::scope::ScreenScope;
use crate::state::view_state::{ScreenData, ViewState};

/// Two-input combine-latest join.
pub struct CombineLatest2<SA, SB>
where
    SA: Stream,
    SB: Stream,
{
    a: SA,
    b: SB,
    latest_a: Option<SA::Item>,
    latest_b: Option<SB::Item>,
    done_a: bool,
    done_b: bool,
}

impl<SA, SB> CombineLatest2<SA, SB>
where
    SA: Stream,
    SB: Stream,
{
    pub fn new(a: SA, b: SB) -> Self {
        Self {
            a,
            b,
            latest_a: None,
            latest_b: None,
            done_a: false,
            done_b: false,
        }
    }
}

impl<SA, SB> Stream for CombineLatest2<SA, SB>
where
    SA: Stream + Unpin,
    SB: Stream + Unpin,
    SA::Item: Clone,
    SB::Item: Clone,
{
    type Item = (SA::Item, SB::Item);

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let mut updated = false;

        // Drain each input, keeping only its newest value.
        while !this.done_a {
            match Pin::new(&mut this.a).poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    this.latest_a = Some(value);
                    updated = true;
                }
                Poll::Ready(None) => this.done_a = true,
                Poll::Pending => break,
            }
        }
        while !this.done_b {
            match Pin::new(&mut this.b).poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    this.latest_b = Some(value);
                    updated = true;
                }
                Poll::Ready(None) => this.done_b = true,
                Poll::Pending => break,
            }
        }

        if updated {
            if let (Some(a), Some(b)) = (&this.latest_a, &this.latest_b) {
                return Poll::Ready(Some((a.clone(), b.clone())));
            }
        }

        // Complete once both inputs have completed, or as soon as one
        // completes without ever emitting (the join can no longer fire).
        let starved = (this.done_a && this.latest_a.is_none())
            || (this.done_b && this.latest_b.is_none());
        if (this.done_a && this.done_b) || starved {
            return Poll::Ready(None);
        }
        Poll::Pending
    }
}

/// Three-input combine-latest join; the shape every screen uses to fold
/// data, the busy flag, and the current message into one snapshot.
pub struct CombineLatest3<SA, SB, SC>
where
    SA: Stream,
    SB: Stream,
    SC: Stream,
{
    a: SA,
    b: SB,
    c: SC,
    latest_a: Option<SA::Item>,
    latest_b: Option<SB::Item>,
    latest_c: Option<SC::Item>,
    done_a: bool,
    done_b: bool,
    done_c: bool,
}

impl<SA, SB, SC> CombineLatest3<SA, SB, SC>
where
    SA: Stream,
    SB: Stream,
    SC: Stream,
{
    pub fn new(a: SA, b: SB, c: SC) -> Self {
        Self {
            a,
            b,
            c,
            latest_a: None,
            latest_b: None,
            latest_c: None,
            done_a: false,
            done_b: false,
            done_c: false,
        }
    }
}

impl<SA, SB, SC> Stream for CombineLatest3<SA, SB, SC>
where
    SA: Stream + Unpin,
    SB: Stream + Unpin,
    SC: Stream + Unpin,
    SA::Item: Clone,
    SB::Item: Clone,
    SC::Item: Clone,
{
    type Item = (SA::Item, SB::Item, SC::Item);

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let mut updated = false;

        while !this.done_a {
            match Pin::new(&mut this.a).poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    this.latest_a = Some(value);
                    updated = true;
                }
                Poll::Ready(None) => this.done_a = true,
                Poll::Pending => break,
            }
        }
        while !this.done_b {
            match Pin::new(&mut this.b).poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    this.latest_b = Some(value);
                    updated = true;
                }
                Poll::Ready(None) => this.done_b = true,
                Poll::Pending => break,
            }
        }
        while !this.done_c {
            match Pin::new(&mut this.c).poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    this.latest_c = Some(value);
                    updated = true;
                }
                Poll::Ready(None) => this.done_c = true,
                Poll::Pending => break,
            }
        }

        if updated {
            if let (Some(a), Some(b), Some(c)) = (&this.latest_a, &this.latest_b, &this.latest_c)
            {
                return Poll::Ready(Some((a.clone(), b.clone(), c.clone())));
            }
        }

        let starved = (this.done_a && this.latest_a.is_none())
            || (this.done_b && this.latest_b.is_none())
            || (this.done_c && this.latest_c.is_none());
        if (this.done_a && this.done_b && this.done_c) || starved {
            return Poll::Ready(None);
        }
        Poll::Pending
    }
}

/// Fold a screen's data stream, busy flag, and current message into
/// view-state snapshots.
///
/// A new snapshot is produced whenever any of the three inputs emits,
/// using the latest known value of the other two. With watch-backed
/// inputs all three are seeded, so the first snapshot is immediate.
pub fn combine_view_state<SD, SL, SM, T, R>(
    data: SD,
    loading: SL,
    messages: SM,
    mut reduce: R,
) -> impl Stream<Item = ViewState<T>> + Send + Unpin
where
    SD: Stream + Unpin + Send,
    SD::Item: Clone + Send,
    SL: Stream<Item = bool> + Unpin + Send,
    SM: Stream<Item = Option<Message>> + Unpin + Send,
    T: ScreenData,
    R: FnMut(SD::Item, bool, Option<Message>) -> ViewState<T> + Send,
{
    CombineLatest3::new(data, loading, messages)
        .map(move |(data, is_loading, message)| reduce(data, is_loading, message))
}

/// Collect a stream into a replay-latest cell on a spawned task.
///
/// The returned receiver always holds the latest snapshot; a slow
/// consumer skips intermediate values rather than buffering them. Equal
/// consecutive values are not republished. The task stops when `scope`
/// closes, the stream ends, or every receiver is dropped.
pub fn state_in<S>(scope: &ScreenScope, stream: S, initial: S::Item) -> watch::Receiver<S::Item>
where
    S: Stream + Send + Unpin + 'static,
    S::Item: Clone + PartialEq + Send + Sync + 'static,
{
    let (tx, rx) = watch::channel(initial);
    let scope = scope.clone();
    tokio::spawn(async move {
        let mut stream = stream;
        loop {
            tokio::select! {
                _ = scope.closed() => break,
                next = stream.next() => {
                    let Some(value) = next else { break };
                    tx.send_if_modified(|current| {
                        if *current != value {
                            *current = value;
                            true
                        } else {
                            false
                        }
                    });
                    if tx.receiver_count() == 0 {
                        break;
                    }
                }
            }
        }
    });
    rx
}
