use tokio_stream::wrappers::WatchStream;

use crate::data::models::Item;
use crate::data::repo::FavoritesRepository;

/// The favorites list, in the order items were favorited.
pub struct ObserveFavorites {
    favorites: FavoritesRepository,
}

impl ObserveFavorites {
    pub fn new(favorites: FavoritesRepository) -> Self {
        Self { favorites }
    }

    pub fn observe(&self) -> WatchStream<Vec<Item>> {
        WatchStream::new(self.favorites.observe_list())
    }
}

/// One item's favorite status.
pub struct ObserveFavoriteStatus {
    favorites: FavoritesRepository,
}

impl ObserveFavoriteStatus {
    pub fn new(favorites: FavoritesRepository) -> Self {
        Self { favorites }
    }

    pub fn observe(&self, item_id: &str) -> WatchStream<bool> {
        WatchStream::new(self.favorites.observe_status(item_id))
    }
}
