use tokio_stream::wrappers::WatchStream;

use crate::data::models::Homepage;
use crate::data::repo::ItemRepository;

/// The assembled homepage feed: featured rails plus recent items.
pub struct ObserveHomepage {
    items: ItemRepository,
}

impl ObserveHomepage {
    pub fn new(items: ItemRepository) -> Self {
        Self { items }
    }

    pub fn observe(&self) -> WatchStream<Homepage> {
        WatchStream::new(self.items.observe_homepage())
    }
}
