use crate::data::repo::{FavoritesRepository, ItemRepository};
use crate::domain::DomainError;

/// Flip an item's favorite status. The item must already be in the
/// local catalog (everything a screen can show is).
pub struct ToggleFavorite {
    favorites: FavoritesRepository,
    items: ItemRepository,
}

impl ToggleFavorite {
    pub fn new(favorites: FavoritesRepository, items: ItemRepository) -> Self {
        Self { favorites, items }
    }

    /// Returns the new favorite status.
    pub async fn execute(&self, item_id: &str) -> Result<bool, DomainError> {
        let item = self
            .items
            .get(item_id)
            .ok_or_else(|| DomainError::validation(format!("Unknown item '{item_id}'")))?;
        Ok(self.favorites.toggle(item))
    }
}
