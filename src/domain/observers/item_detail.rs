use tokio_stream::wrappers::WatchStream;

use crate::data::models::ItemDetail;
use crate::data::repo::ItemRepository;

/// One item's detail; `None` until it has been fetched at least once.
pub struct ObserveItemDetail {
    items: ItemRepository,
}

impl ObserveItemDetail {
    pub fn new(items: ItemRepository) -> Self {
        Self { items }
    }

    pub fn observe(&self, item_id: &str) -> WatchStream<Option<ItemDetail>> {
        WatchStream::new(self.items.observe_detail(item_id))
    }
}
