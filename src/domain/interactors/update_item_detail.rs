use std::sync::Arc;

use crate::data::api::CatalogApi;
use crate::data::models::ItemDetail;
use crate::data::repo::ItemRepository;
use crate::domain::DomainError;

/// Fetch one item's metadata and publish it through the detail
/// broadcast.
pub struct UpdateItemDetail<C> {
    api: Arc<C>,
    items: ItemRepository,
}

impl<C: CatalogApi> UpdateItemDetail<C> {
    pub fn new(api: Arc<C>, items: ItemRepository) -> Self {
        Self { api, items }
    }

    pub async fn execute(&self, item_id: &str) -> Result<ItemDetail, DomainError> {
        let detail = self.api.metadata(item_id).await?;
        self.items.upsert_detail(detail.clone());
        Ok(detail)
    }
}
