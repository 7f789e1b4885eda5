use futures_core::Stream;
use futures_util::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::data::models::User;
use crate::data::repo::AccountRepository;

/// The shared session observer. Anonymous sessions surface as `None`;
/// screens only ever see a signed-in user or nothing.
pub struct ObserveUser {
    account: AccountRepository,
}

impl ObserveUser {
    pub fn new(account: AccountRepository) -> Self {
        Self { account }
    }

    pub fn observe(&self) -> impl Stream<Item = Option<User>> + Send + Unpin {
        WatchStream::new(self.account.observe())
            .map(|user| user.filter(|user| !user.anonymous))
    }
}
