use std::sync::Arc;

use crate::data::api::CatalogApi;
use crate::data::models::{Item, SearchQuery};
use crate::data::repo::ItemRepository;
use crate::domain::DomainError;

/// Run a catalog search and merge the results into the local catalog.
pub struct SearchItems<C> {
    api: Arc<C>,
    items: ItemRepository,
}

impl<C: CatalogApi> SearchItems<C> {
    pub fn new(api: Arc<C>, items: ItemRepository) -> Self {
        Self { api, items }
    }

    pub async fn execute(&self, query: SearchQuery) -> Result<Vec<Item>, DomainError> {
        let results = self.api.search(&query).await?;
        self.items.upsert_items(results.clone());
        Ok(results)
    }
}
