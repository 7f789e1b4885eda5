//! Shared test utilities and the scripted catalog stub.

#![allow(dead_code, unused_imports)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{watch, Notify};

use openshelf::data::{ApiError, CatalogApi, Item, ItemDetail, MediaType, SearchQuery};

pub const TIMEOUT: Duration = Duration::from_secs(2);

/// Wait until the watched value satisfies the predicate, returning it.
pub async fn wait_for<T, F>(rx: &mut watch::Receiver<T>, mut pred: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    tokio::time::timeout(TIMEOUT, async {
        loop {
            {
                let value = rx.borrow_and_update();
                if pred(&value) {
                    return value.clone();
                }
            }
            rx.changed().await.expect("state channel closed");
        }
    })
    .await
    .expect("timed out waiting for state")
}

pub fn item(id: &str, title: &str, creator: &str) -> Item {
    Item {
        id: id.to_string(),
        title: title.to_string(),
        creator: Some(creator.to_string()),
        media_type: MediaType::Texts,
        cover_url: format!("https://archive.org/services/img/{id}"),
    }
}

pub fn detail(id: &str, title: &str, creator: &str) -> ItemDetail {
    ItemDetail {
        id: id.to_string(),
        title: title.to_string(),
        creator: Some(creator.to_string()),
        description: String::new(),
        media_type: MediaType::Texts,
        cover_url: format!("https://archive.org/services/img/{id}"),
        files: Vec::new(),
    }
}

/// Scripted catalog: replies are popped per call, in order. An `Err`
/// entry is the failing HTTP status to report. A gate armed with
/// [`hold`](Self::hold) parks the next call until notified, so tests can
/// observe the in-flight state deterministically.
pub struct StubCatalog {
    searches: Mutex<VecDeque<Result<Vec<Item>, u16>>>,
    details: Mutex<VecDeque<Result<ItemDetail, u16>>>,
    gate: Mutex<Option<Arc<Notify>>>,
    delay: Mutex<Option<Duration>>,
    pub search_calls: Mutex<Vec<SearchQuery>>,
}

impl StubCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            searches: Mutex::new(VecDeque::new()),
            details: Mutex::new(VecDeque::new()),
            gate: Mutex::new(None),
            delay: Mutex::new(None),
            search_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn push_search(&self, reply: Result<Vec<Item>, u16>) {
        self.searches.lock().push_back(reply);
    }

    pub fn push_detail(&self, reply: Result<ItemDetail, u16>) {
        self.details.lock().push_back(reply);
    }

    /// Park the next catalog call until the returned gate is notified.
    pub fn hold(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Delay every call by `duration`.
    pub fn set_delay(&self, duration: Duration) {
        *self.delay.lock() = Some(duration);
    }

    async fn pause(&self) {
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn status_error(url: &str, status: u16) -> ApiError {
        ApiError::Status {
            url: url.to_string(),
            status,
        }
    }
}

impl CatalogApi for StubCatalog {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Item>, ApiError>> + Send {
        let query = query.clone();
        async move {
            self.search_calls.lock().push(query);
            self.pause().await;
            match self.searches.lock().pop_front() {
                Some(Ok(items)) => Ok(items),
                Some(Err(status)) => Err(Self::status_error("stub://search", status)),
                None => Ok(Vec::new()),
            }
        }
    }

    fn metadata(
        &self,
        item_id: &str,
    ) -> impl Future<Output = Result<ItemDetail, ApiError>> + Send {
        let item_id = item_id.to_string();
        async move {
            self.pause().await;
            match self.details.lock().pop_front() {
                Some(Ok(detail)) => Ok(detail),
                Some(Err(status)) => Err(Self::status_error("stub://metadata", status)),
                None => Ok(detail_placeholder(&item_id)),
            }
        }
    }
}

fn detail_placeholder(item_id: &str) -> ItemDetail {
    detail(item_id, item_id, "unknown")
}
