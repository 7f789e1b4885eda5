use tokio_stream::wrappers::WatchStream;

use crate::data::repo::RecentSearchRepository;

/// Recent search keywords, most recent first.
pub struct ObserveRecentSearches {
    recent: RecentSearchRepository,
}

impl ObserveRecentSearches {
    pub fn new(recent: RecentSearchRepository) -> Self {
        Self { recent }
    }

    pub fn observe(&self) -> WatchStream<Vec<String>> {
        WatchStream::new(self.recent.observe())
    }
}
