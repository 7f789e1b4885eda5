use std::sync::Arc;

use crate::data::api::CatalogApi;
use crate::data::models::SearchQuery;
use crate::data::repo::ItemRepository;
use crate::domain::DomainError;

/// Fetch a creator's other works into the catalog, so the creator-items
/// observer has something to recompute over.
pub struct UpdateCreatorItems<C> {
    api: Arc<C>,
    items: ItemRepository,
}

impl<C: CatalogApi> UpdateCreatorItems<C> {
    pub fn new(api: Arc<C>, items: ItemRepository) -> Self {
        Self { api, items }
    }

    pub async fn execute(&self, creator: &str) -> Result<(), DomainError> {
        let results = self.api.search(&SearchQuery::by_creator(creator)).await?;
        self.items.upsert_items(results);
        Ok(())
    }
}
