//! Sign-in screen.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::info;

use crate::data::models::User;
use crate::data::repo::AccountRepository;
use crate::domain::collect_status;
use crate::domain::interactors::{SignInUser, SignOutUser};
use crate::domain::observers::ObserveUser;
use crate::navigation::Navigator;
use crate::state::{
    combine_view_state, state_in, LoadingCounter, MessageId, MessageQueue, ScreenData,
    ScreenScope, ViewState,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthData {
    pub user: Option<User>,
}

impl ScreenData for AuthData {}

pub struct AuthController {
    scope: ScreenScope,
    loading: Arc<LoadingCounter>,
    messages: Arc<MessageQueue>,
    state: watch::Receiver<ViewState<AuthData>>,
    sign_in: Arc<SignInUser>,
    sign_out: Arc<SignOutUser>,
    navigator: Navigator,
}

impl AuthController {
    pub fn new(account: AccountRepository, navigator: Navigator) -> Self {
        let scope = ScreenScope::new();
        let loading = Arc::new(LoadingCounter::new());
        let messages = Arc::new(MessageQueue::new());

        let data = ObserveUser::new(account.clone())
            .observe()
            .map(|user| AuthData { user });
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
            sign_in: Arc::new(SignInUser::new(account.clone())),
            sign_out: Arc::new(SignOutUser::new(account)),
            navigator,
        }
    }

    pub fn state(&self) -> watch::Receiver<ViewState<AuthData>> {
        self.state.clone()
    }

    /// Validate and start a session; navigates back on success.
    pub fn sign_in(&self, email: &str, password: &str) {
        info!(%email, "sign-in intent");
        let email = email.to_string();
        let password = password.to_string();
        let scope = self.scope.clone();
        let loading = Arc::clone(&self.loading);
        let messages = Arc::clone(&self.messages);
        let sign_in = Arc::clone(&self.sign_in);
        let navigator = self.navigator.clone();
        tokio::spawn(async move {
            let signed_in = collect_status(
                &scope,
                &loading,
                &messages,
                sign_in.execute(&email, &password),
            )
            .await;
            if signed_in.is_some() && !scope.is_closed() {
                navigator.back();
            }
        });
    }

    pub fn sign_out(&self) {
        let scope = self.scope.clone();
        let loading = Arc::clone(&self.loading);
        let messages = Arc::clone(&self.messages);
        let sign_out = Arc::clone(&self.sign_out);
        tokio::spawn(async move {
            collect_status(&scope, &loading, &messages, sign_out.execute()).await;
        });
    }

    pub fn dismiss_message(&self, id: MessageId) {
        self.messages.dismiss(id);
    }

    pub fn close(&self) {
        self.scope.close();
    }
}
