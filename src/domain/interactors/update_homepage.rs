use std::sync::Arc;

use crate::data::api::CatalogApi;
use crate::data::models::{ItemRail, SearchQuery};
use crate::data::repo::ItemRepository;
use crate::domain::DomainError;

/// The curated collections the homepage is built from.
const FEATURED_RAILS: &[(&str, &str)] = &[
    ("Featured books", "internetarchivebooks"),
    ("Featured audiobooks", "librivoxaudio"),
];

/// Rebuild the homepage rails from the featured collections.
pub struct UpdateHomepage<C> {
    api: Arc<C>,
    items: ItemRepository,
}

impl<C: CatalogApi> UpdateHomepage<C> {
    pub fn new(api: Arc<C>, items: ItemRepository) -> Self {
        Self { api, items }
    }

    /// Fetches every rail; a homepage with no successful rail reports
    /// the first failure instead of publishing an empty feed.
    pub async fn execute(&self) -> Result<(), DomainError> {
        let mut rails = Vec::with_capacity(FEATURED_RAILS.len());
        let mut first_error = None;
        for (title, collection) in FEATURED_RAILS {
            match self.api.search(&SearchQuery::by_collection(*collection)).await {
                Ok(items) if !items.is_empty() => rails.push(ItemRail {
                    title: (*title).to_string(),
                    items,
                }),
                Ok(_) => {}
                Err(error) => {
                    first_error.get_or_insert(error);
                }
            }
        }
        if rails.is_empty() {
            if let Some(error) = first_error {
                return Err(error.into());
            }
        }
        self.items.set_rails(rails);
        Ok(())
    }
}
