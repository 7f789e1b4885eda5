//! Homepage: featured rails, recent items, and the session header.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::info;

use crate::data::api::CatalogApi;
use crate::data::models::{Homepage, User};
use crate::data::repo::{AccountRepository, ItemRepository};
use crate::domain::collect_status;
use crate::domain::interactors::UpdateHomepage;
use crate::domain::observers::{ObserveHomepage, ObserveUser};
use crate::navigation::{Navigator, Screen};
use crate::state::{
    combine_view_state, state_in, CombineLatest2, LoadingCounter, MessageId, MessageQueue,
    ScreenData, ScreenScope, ViewState,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeData {
    pub homepage: Homepage,
    pub user: Option<User>,
}

impl ScreenData for HomeData {}

impl ViewState<HomeData> {
    /// Nothing to show and a failure pending: render the error full
    /// screen instead of as a passing notification.
    pub fn is_full_screen_error(&self) -> bool {
        let empty = self
            .data
            .as_ref()
            .map(|data| data.homepage.is_empty())
            .unwrap_or(true);
        empty && self.message.is_some()
    }
}

pub struct HomepageController<C> {
    scope: ScreenScope,
    loading: Arc<LoadingCounter>,
    messages: Arc<MessageQueue>,
    state: watch::Receiver<ViewState<HomeData>>,
    update_homepage: Arc<UpdateHomepage<C>>,
    navigator: Navigator,
}

impl<C: CatalogApi + 'static> HomepageController<C> {
    pub fn new(
        api: Arc<C>,
        items: ItemRepository,
        account: AccountRepository,
        navigator: Navigator,
    ) -> Self {
        let scope = ScreenScope::new();
        let loading = Arc::new(LoadingCounter::new());
        let messages = Arc::new(MessageQueue::new());

        let data = CombineLatest2::new(
            ObserveHomepage::new(items.clone()).observe(),
            ObserveUser::new(account).observe(),
        )
        .map(|(homepage, user)| HomeData { homepage, user });
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
            update_homepage: Arc::new(UpdateHomepage::new(api, items)),
            navigator,
        }
    }

    pub fn state(&self) -> watch::Receiver<ViewState<HomeData>> {
        self.state.clone()
    }

    /// Rebuild the homepage from the featured collections.
    pub fn refresh(&self) {
        info!("homepage refresh intent");
        let scope = self.scope.clone();
        let loading = Arc::clone(&self.loading);
        let messages = Arc::clone(&self.messages);
        let update_homepage = Arc::clone(&self.update_homepage);
        tokio::spawn(async move {
            collect_status(&scope, &loading, &messages, update_homepage.execute()).await;
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
