//! Item detail screen: one item's metadata, more by the same creator,
//! and its favorite status.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::info;

use crate::data::api::CatalogApi;
use crate::data::models::{Item, ItemDetail};
use crate::data::repo::{FavoritesRepository, ItemRepository};
use crate::domain::collect_status;
use crate::domain::interactors::{
    AddRecentItem, ToggleFavorite, UpdateCreatorItems, UpdateItemDetail,
};
use crate::domain::observers::{ObserveCreatorItems, ObserveFavoriteStatus, ObserveItemDetail};
use crate::navigation::{Navigator, Screen};
use crate::state::{
    combine_view_state, state_in, CombineLatest3, LoadingCounter, MessageId, MessageQueue,
    ScreenData, ScreenScope, ViewState,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDetailData {
    pub detail: Option<ItemDetail>,
    pub by_creator: Vec<Item>,
    pub is_favorite: bool,
}

impl ScreenData for ItemDetailData {}

pub struct ItemDetailController<C> {
    item_id: String,
    scope: ScreenScope,
    loading: Arc<LoadingCounter>,
    messages: Arc<MessageQueue>,
    state: watch::Receiver<ViewState<ItemDetailData>>,
    detail_rx: watch::Receiver<Option<ItemDetail>>,
    update_detail: Arc<UpdateItemDetail<C>>,
    update_creator_items: Arc<UpdateCreatorItems<C>>,
    add_recent_item: Arc<AddRecentItem>,
    toggle_favorite: Arc<ToggleFavorite>,
    navigator: Navigator,
}

impl<C: CatalogApi + 'static> ItemDetailController<C> {
    pub fn new(
        item_id: &str,
        api: Arc<C>,
        items: ItemRepository,
        favorites: FavoritesRepository,
        navigator: Navigator,
    ) -> Self {
        let scope = ScreenScope::new();
        let loading = Arc::new(LoadingCounter::new());
        let messages = Arc::new(MessageQueue::new());

        let data = CombineLatest3::new(
            ObserveItemDetail::new(items.clone()).observe(item_id),
            ObserveCreatorItems::new(items.clone()).observe(item_id),
            ObserveFavoriteStatus::new(favorites.clone()).observe(item_id),
        )
        .map(|(detail, by_creator, is_favorite)| ItemDetailData {
            detail,
            by_creator,
            is_favorite,
        });
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
            detail_rx: items.observe_detail(item_id),
            update_detail: Arc::new(UpdateItemDetail::new(Arc::clone(&api), items.clone())),
            update_creator_items: Arc::new(UpdateCreatorItems::new(api, items.clone())),
            add_recent_item: Arc::new(AddRecentItem::new(items.clone())),
            toggle_favorite: Arc::new(ToggleFavorite::new(favorites, items)),
            navigator,
            item_id: item_id.to_string(),
        }
    }

    pub fn state(&self) -> watch::Receiver<ViewState<ItemDetailData>> {
        self.state.clone()
    }

    /// Fetch the item's metadata, then the creator's other works.
    pub fn refresh(&self) {
        info!(item_id = %self.item_id, "refresh intent");
        let item_id = self.item_id.clone();
        let scope = self.scope.clone();
        let loading = Arc::clone(&self.loading);
        let messages = Arc::clone(&self.messages);
        let update_detail = Arc::clone(&self.update_detail);
        let update_creator_items = Arc::clone(&self.update_creator_items);
        let add_recent_item = Arc::clone(&self.add_recent_item);
        tokio::spawn(async move {
            let detail =
                collect_status(&scope, &loading, &messages, update_detail.execute(&item_id)).await;
            let Some(detail) = detail else { return };
            if scope.is_closed() {
                return;
            }
            // The visit feeds the homepage's recent row.
            add_recent_item.execute(&item_id).await.ok();
            if let Some(creator) = detail.creator {
                collect_status(
                    &scope,
                    &loading,
                    &messages,
                    update_creator_items.execute(&creator),
                )
                .await;
            }
        });
    }

    pub fn toggle_favorite(&self) {
        let item_id = self.item_id.clone();
        let scope = self.scope.clone();
        let loading = Arc::clone(&self.loading);
        let messages = Arc::clone(&self.messages);
        let toggle = Arc::clone(&self.toggle_favorite);
        tokio::spawn(async move {
            collect_status(&scope, &loading, &messages, toggle.execute(&item_id)).await;
        });
    }

    /// Jump to a search for everything by this item's creator.
    pub fn open_search_by_creator(&self) {
        let creator = self
            .detail_rx
            .borrow()
            .as_ref()
            .and_then(|detail| detail.creator.clone());
        if let Some(creator) = creator {
            self.navigator.navigate(Screen::Search { keyword: creator });
        }
    }

    pub fn dismiss_message(&self, id: MessageId) {
        self.messages.dismiss(id);
    }

    pub fn close(&self) {
        self.scope.close();
    }
}
