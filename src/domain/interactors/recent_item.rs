use crate::data::repo::ItemRepository;
use crate::domain::DomainError;

/// Record that an item was opened, feeding the homepage's recent row.
pub struct AddRecentItem {
    items: ItemRepository,
}

impl AddRecentItem {
    pub fn new(items: ItemRepository) -> Self {
        Self { items }
    }

    pub async fn execute(&self, item_id: &str) -> Result<(), DomainError> {
        self.items.add_recent_item(item_id);
        Ok(())
    }
}
