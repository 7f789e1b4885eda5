//! One-shot asynchronous operations triggered by user intents.
//!
//! Remote interactors fetch through [`CatalogApi`](crate::data::CatalogApi)
//! and apply their result to a repository before returning, so the
//! matching observer has already republished by the time the operation
//! reports success.

mod account;
mod recent_item;
mod recent_search;
mod search_items;
mod toggle_favorite;
mod update_creator_items;
mod update_homepage;
mod update_item_detail;

pub use account::{SignInUser, SignOutUser};
pub use recent_item::AddRecentItem;
pub use recent_search::{AddRecentSearch, RemoveRecentSearch};
pub use search_items::SearchItems;
pub use toggle_favorite::ToggleFavorite;
pub use update_creator_items::UpdateCreatorItems;
pub use update_homepage::UpdateHomepage;
pub use update_item_detail::UpdateItemDetail;
