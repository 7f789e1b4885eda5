//! Local watch-broadcast repositories.
//!
//! The persistent cache behind these is an external collaborator; what
//! the rest of the crate depends on is the observable surface: every
//! repository is a `Clone`-cheap handle around shared state whose
//! queries are replay-latest broadcasts, so an observer restarted at any
//! time resumes from the current value.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use crate::data::models::{Homepage, Item, ItemDetail, ItemRail, User};

const RECENT_ITEM_CAP: usize = 20;
const RECENT_SEARCH_CAP: usize = 30;

/// Catalog items, item details, and the assembled homepage feed.
#[derive(Clone)]
pub struct ItemRepository {
    inner: Arc<ItemStore>,
}

struct ItemStore {
    items: Mutex<HashMap<String, Item>>,
    details: Mutex<HashMap<String, watch::Sender<Option<ItemDetail>>>>,
    /// Bumped on every catalog change; derived queries recompute on it.
    catalog_tx: watch::Sender<u64>,
    rails: Mutex<Vec<ItemRail>>,
    recent: Mutex<Vec<String>>,
    homepage_tx: watch::Sender<Homepage>,
}

impl ItemRepository {
    pub fn new() -> Self {
        let (catalog_tx, _) = watch::channel(0);
        let (homepage_tx, _) = watch::channel(Homepage::default());
        Self {
            inner: Arc::new(ItemStore {
                items: Mutex::new(HashMap::new()),
                details: Mutex::new(HashMap::new()),
                catalog_tx,
                rails: Mutex::new(Vec::new()),
                recent: Mutex::new(Vec::new()),
                homepage_tx,
            }),
        }
    }

    /// Merge items into the catalog and notify derived queries.
    pub fn upsert_items(&self, items: Vec<Item>) {
        if items.is_empty() {
            return;
        }
        {
            let mut map = self.inner.items.lock();
            for item in items {
                map.insert(item.id.clone(), item);
            }
        }
        self.bump_catalog();
    }

    /// Store one item's detail and publish it to detail observers.
    pub fn upsert_detail(&self, detail: ItemDetail) {
        let summary = crate::data::mappers::item_of_detail(&detail);
        self.inner
            .items
            .lock()
            .insert(summary.id.clone(), summary);
        self.detail_sender(&detail.id).send_replace(Some(detail));
        self.bump_catalog();
    }

    pub fn get(&self, item_id: &str) -> Option<Item> {
        self.inner.items.lock().get(item_id).cloned()
    }

    /// Replay-latest broadcast of one item's detail.
    pub fn observe_detail(&self, item_id: &str) -> watch::Receiver<Option<ItemDetail>> {
        self.detail_sender(item_id).subscribe()
    }

    /// Replay-latest broadcast of the catalog version.
    pub fn observe_catalog(&self) -> watch::Receiver<u64> {
        self.inner.catalog_tx.subscribe()
    }

    /// Other catalog items by the same creator, excluding `exclude_id`.
    pub fn items_by_creator(&self, creator: &str, exclude_id: &str) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .inner
            .items
            .lock()
            .values()
            .filter(|item| item.id != exclude_id)
            .filter(|item| item.creator.as_deref() == Some(creator))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.title.cmp(&b.title));
        items
    }

    /// Replace the homepage rails; rail items also enter the catalog.
    pub fn set_rails(&self, rails: Vec<ItemRail>) {
        {
            let mut map = self.inner.items.lock();
            for rail in &rails {
                for item in &rail.items {
                    map.insert(item.id.clone(), item.clone());
                }
            }
            *self.inner.rails.lock() = rails;
        }
        self.bump_catalog();
        self.publish_homepage();
    }

    /// Record that an item was opened; it joins the recent row of the
    /// homepage, newest first.
    pub fn add_recent_item(&self, item_id: &str) {
        {
            let mut recent = self.inner.recent.lock();
            recent.retain(|id| id != item_id);
            recent.insert(0, item_id.to_string());
            recent.truncate(RECENT_ITEM_CAP);
        }
        self.publish_homepage();
    }

    /// Replay-latest broadcast of the assembled homepage.
    pub fn observe_homepage(&self) -> watch::Receiver<Homepage> {
        self.inner.homepage_tx.subscribe()
    }

    fn detail_sender(&self, item_id: &str) -> watch::Sender<Option<ItemDetail>> {
        let mut details = self.inner.details.lock();
        details
            .entry(item_id.to_string())
            .or_insert_with(|| watch::channel(None).0)
            .clone()
    }

    fn bump_catalog(&self) {
        self.inner.catalog_tx.send_modify(|version| *version += 1);
    }

    fn publish_homepage(&self) {
        let rails = self.inner.rails.lock().clone();
        let recent = {
            let items = self.inner.items.lock();
            self.inner
                .recent
                .lock()
                .iter()
                .filter_map(|id| items.get(id).cloned())
                .collect()
        };
        debug!(rails = rails.len(), "homepage published");
        self.inner.homepage_tx.send_replace(Homepage { rails, recent });
    }
}

impl Default for ItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Favorite items, in the order they were favorited.
#[derive(Clone)]
pub struct FavoritesRepository {
    inner: Arc<FavoritesStore>,
}

struct FavoritesStore {
    entries: Mutex<Vec<Item>>,
    list_tx: watch::Sender<Vec<Item>>,
    status: Mutex<HashMap<String, watch::Sender<bool>>>,
}

impl FavoritesRepository {
    pub fn new() -> Self {
        let (list_tx, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(FavoritesStore {
                entries: Mutex::new(Vec::new()),
                list_tx,
                status: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Flip an item's favorite status; returns the new status.
    pub fn toggle(&self, item: Item) -> bool {
        let item_id = item.id.clone();
        // Both broadcasts publish under the entries lock so concurrent
        // togglers and subscribers never see a stale status.
        let mut entries = self.inner.entries.lock();
        let before = entries.len();
        entries.retain(|entry| entry.id != item.id);
        let removed = entries.len() != before;
        if !removed {
            entries.push(item);
        }
        self.inner.list_tx.send_replace(entries.clone());
        let now_favorite = !removed;
        self.status_sender(&item_id).send_replace(now_favorite);
        debug!(%item_id, now_favorite, "favorite toggled");
        now_favorite
    }

    pub fn is_favorite(&self, item_id: &str) -> bool {
        self.inner
            .entries
            .lock()
            .iter()
            .any(|entry| entry.id == item_id)
    }

    /// Replay-latest broadcast of the favorites list.
    pub fn observe_list(&self) -> watch::Receiver<Vec<Item>> {
        self.inner.list_tx.subscribe()
    }

    /// Replay-latest broadcast of one item's favorite status.
    pub fn observe_status(&self, item_id: &str) -> watch::Receiver<bool> {
        let entries = self.inner.entries.lock();
        let current = entries.iter().any(|entry| entry.id == item_id);
        let sender = self.status_sender(item_id);
        sender.send_replace(current);
        sender.subscribe()
    }

    fn status_sender(&self, item_id: &str) -> watch::Sender<bool> {
        let mut status = self.inner.status.lock();
        status
            .entry(item_id.to_string())
            .or_insert_with(|| watch::channel(false).0)
            .clone()
    }
}

impl Default for FavoritesRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Recent search keywords, most recent first, deduplicated and capped.
#[derive(Clone)]
pub struct RecentSearchRepository {
    inner: Arc<RecentSearchStore>,
}

struct RecentSearchStore {
    entries: Mutex<Vec<String>>,
    tx: watch::Sender<Vec<String>>,
}

impl RecentSearchRepository {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(RecentSearchStore {
                entries: Mutex::new(Vec::new()),
                tx,
            }),
        }
    }

    pub fn add(&self, keyword: &str) {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return;
        }
        let mut entries = self.inner.entries.lock();
        entries.retain(|entry| !entry.eq_ignore_ascii_case(keyword));
        entries.insert(0, keyword.to_string());
        entries.truncate(RECENT_SEARCH_CAP);
        self.inner.tx.send_replace(entries.clone());
    }

    pub fn remove(&self, keyword: &str) {
        let mut entries = self.inner.entries.lock();
        entries.retain(|entry| !entry.eq_ignore_ascii_case(keyword));
        self.inner.tx.send_replace(entries.clone());
    }

    /// Replay-latest broadcast of the recent-search list.
    pub fn observe(&self) -> watch::Receiver<Vec<String>> {
        self.inner.tx.subscribe()
    }
}

impl Default for RecentSearchRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// The current account session, shared app-wide as a read-only
/// broadcast from any screen's perspective.
#[derive(Clone)]
pub struct AccountRepository {
    session_tx: Arc<watch::Sender<Option<User>>>,
}

impl AccountRepository {
    pub fn new() -> Self {
        let (session_tx, _) = watch::channel(None);
        Self {
            session_tx: Arc::new(session_tx),
        }
    }

    pub fn sign_in(&self, user: User) {
        debug!(email = %user.email, "session started");
        self.session_tx.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        debug!("session ended");
        self.session_tx.send_replace(None);
    }

    pub fn current(&self) -> Option<User> {
        self.session_tx.borrow().clone()
    }

    /// Replay-latest broadcast of the session.
    pub fn observe(&self) -> watch::Receiver<Option<User>> {
        self.session_tx.subscribe()
    }
}

impl Default for AccountRepository {
    fn default() -> Self {
        Self::new()
    }
}
