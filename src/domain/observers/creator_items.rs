use futures_core::Stream;
use futures_util::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::data::models::Item;
use crate::data::repo::ItemRepository;
use crate::state::CombineLatest2;

/// Other items by the creator of one item, for the "more by this
/// author" row.
///
/// The creator is only known once the item's detail has loaded, so this
/// joins the detail broadcast with the catalog version and recomputes
/// the query whenever either changes.
pub struct ObserveCreatorItems {
    items: ItemRepository,
}

impl ObserveCreatorItems {
    pub fn new(items: ItemRepository) -> Self {
        Self { items }
    }

    pub fn observe(&self, item_id: &str) -> impl Stream<Item = Vec<Item>> + Send + Unpin {
        let items = self.items.clone();
        let item_id = item_id.to_string();
        CombineLatest2::new(
            WatchStream::new(self.items.observe_detail(&item_id)),
            WatchStream::new(self.items.observe_catalog()),
        )
        .map(move |(detail, _version)| match detail.and_then(|d| d.creator) {
            Some(creator) => items.items_by_creator(&creator, &item_id),
            None => Vec::new(),
        })
    }
}
