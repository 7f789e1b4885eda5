//! Catalog search screen.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::info;

use crate::data::api::CatalogApi;
use crate::data::models::{Item, SearchQuery};
use crate::data::repo::{ItemRepository, RecentSearchRepository};
use crate::domain::collect_status;
use crate::domain::interactors::{AddRecentSearch, RemoveRecentSearch, SearchItems};
use crate::domain::observers::ObserveRecentSearches;
use crate::navigation::{Navigator, Screen};
use crate::state::{
    combine_view_state, state_in, CombineLatest2, LoadingCounter, MessageId, MessageQueue,
    ScreenData, ScreenScope, ViewState,
};

/// Everything the search screen renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchData {
    pub results: Vec<Item>,
    pub recent_searches: Vec<String>,
}

impl ScreenData for SearchData {}

pub struct SearchController<C> {
    scope: ScreenScope,
    loading: Arc<LoadingCounter>,
    messages: Arc<MessageQueue>,
    state: watch::Receiver<ViewState<SearchData>>,
    results_tx: Arc<watch::Sender<Vec<Item>>>,
    search_items: Arc<SearchItems<C>>,
    add_recent: Arc<AddRecentSearch>,
    remove_recent: Arc<RemoveRecentSearch>,
    navigator: Navigator,
}

impl<C: CatalogApi + 'static> SearchController<C> {
    pub fn new(
        api: Arc<C>,
        items: ItemRepository,
        recent: RecentSearchRepository,
        navigator: Navigator,
    ) -> Self {
        let scope = ScreenScope::new();
        let loading = Arc::new(LoadingCounter::new());
        let messages = Arc::new(MessageQueue::new());
        let (results_tx, results_rx) = watch::channel(Vec::new());

        let data = CombineLatest2::new(
            WatchStream::new(results_rx),
            ObserveRecentSearches::new(recent.clone()).observe(),
        )
        .map(|(results, recent_searches)| SearchData {
            results,
            recent_searches,
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
            results_tx: Arc::new(results_tx),
            search_items: Arc::new(SearchItems::new(api, items)),
            add_recent: Arc::new(AddRecentSearch::new(recent.clone())),
            remove_recent: Arc::new(RemoveRecentSearch::new(recent)),
            navigator,
        }
    }

    /// Replay-latest view-state cell for the presentation layer.
    pub fn state(&self) -> watch::Receiver<ViewState<SearchData>> {
        self.state.clone()
    }

    /// Run a search, recording the keyword in recent searches first.
    pub fn search(&self, keyword: &str) {
        let keyword = keyword.trim().to_string();
        info!(%keyword, "search intent");
        let scope = self.scope.clone();
        let loading = Arc::clone(&self.loading);
        let messages = Arc::clone(&self.messages);
        let search_items = Arc::clone(&self.search_items);
        let add_recent = Arc::clone(&self.add_recent);
        let results_tx = Arc::clone(&self.results_tx);
        tokio::spawn(async move {
            let outcome = collect_status(&scope, &loading, &messages, async {
                add_recent.execute(&keyword).await?;
                search_items.execute(SearchQuery::keyword(&keyword)).await
            })
            .await;
            if let Some(results) = outcome {
                if !scope.is_closed() {
                    results_tx.send_replace(results);
                }
            }
        });
    }

    pub fn remove_recent_search(&self, keyword: &str) {
        let keyword = keyword.to_string();
        let scope = self.scope.clone();
        let loading = Arc::clone(&self.loading);
        let messages = Arc::clone(&self.messages);
        let remove_recent = Arc::clone(&self.remove_recent);
        tokio::spawn(async move {
            collect_status(
                &scope,
                &loading,
                &messages,
                remove_recent.execute(&keyword),
            )
            .await;
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

    /// Tear down subscriptions and in-flight work for this screen.
    pub fn close(&self) {
        self.scope.close();
    }
}
