//! Library screen: the user's favorite items.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::data::models::Item;
use crate::data::repo::{FavoritesRepository, ItemRepository};
use crate::domain::collect_status;
use crate::domain::interactors::ToggleFavorite;
use crate::domain::observers::ObserveFavorites;
use crate::navigation::{Navigator, Screen};
use crate::state::{
    combine_view_state, state_in, LoadingCounter, MessageId, MessageQueue, ScreenData,
    ScreenScope, ViewState,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LibraryData {
    pub favorites: Vec<Item>,
}

impl ScreenData for LibraryData {}

pub struct LibraryController {
    scope: ScreenScope,
    loading: Arc<LoadingCounter>,
    messages: Arc<MessageQueue>,
    state: watch::Receiver<ViewState<LibraryData>>,
    toggle_favorite: Arc<ToggleFavorite>,
    navigator: Navigator,
}

impl LibraryController {
    pub fn new(
        items: ItemRepository,
        favorites: FavoritesRepository,
        navigator: Navigator,
    ) -> Self {
        let scope = ScreenScope::new();
        let loading = Arc::new(LoadingCounter::new());
        let messages = Arc::new(MessageQueue::new());

        let data = ObserveFavorites::new(favorites.clone())
            .observe()
            .map(|favorites| LibraryData { favorites });
        let snapshots = combine_view_state(
            data,
            WatchStream::new(loading.observe()),
            WatchStream::new(messages.observe()),
            |data, is_loading, message| ViewState {
                data: Some(data),
                is_loading,
                message,
            },
        );
        let state = state_in(&scope, snapshots, ViewState::default());

        Self {
            scope,
            loading,
            messages,
            state,
            toggle_favorite: Arc::new(ToggleFavorite::new(favorites, items)),
            navigator,
        }
    }

    pub fn state(&self) -> watch::Receiver<ViewState<LibraryData>> {
        self.state.clone()
    }

    /// Remove (or re-add) an item from favorites.
    pub fn toggle_favorite(&self, item_id: &str) {
        let item_id = item_id.to_string();
        let scope = self.scope.clone();
        let loading = Arc::clone(&self.loading);
        let messages = Arc::clone(&self.messages);
        let toggle = Arc::clone(&self.toggle_favorite);
        tokio::spawn(async move {
            collect_status(&scope, &loading, &messages, toggle.execute(&item_id)).await;
        });
    }

    pub fn open_item(&self, item_id: &str) {
        self.navigator.navigate(Screen::ItemDetail {
            item_id: item_id.to_string(),
        });
    }

    pub fn dismiss_message(&self, id: MessageId) {
        self.messages.dismiss(id);
    }

    pub fn close(&self) {
        self.scope.close();
    }
}
