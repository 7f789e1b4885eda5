//! Restartable, replay-latest data observers.
//!
//! Each observer wraps one repository query as a stream: a subscriber
//! immediately receives the current value, then every change, for as
//! long as it stays subscribed. Observers never fetch; pairing them with
//! the interactor that refreshes their backing data is the screen
//! controller's job.

mod creator_items;
mod favorites;
mod homepage;
mod item_detail;
mod recent_searches;
mod user;

pub use creator_items::ObserveCreatorItems;
pub use favorites::{ObserveFavoriteStatus, ObserveFavorites};
pub use homepage::ObserveHomepage;
pub use item_detail::ObserveItemDetail;
pub use recent_searches::ObserveRecentSearches;
pub use user::ObserveUser;
