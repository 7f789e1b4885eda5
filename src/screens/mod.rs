//! Screen controllers.
//!
//! One controller per screen, each an instance of the same pattern: it
//! exclusively owns a [`LoadingCounter`](crate::state::LoadingCounter),
//! a [`MessageQueue`](crate::state::MessageQueue), and a
//! [`ScreenScope`](crate::state::ScreenScope); subscribes its data
//! observers; and exposes one replay-latest `ViewState` cell the
//! presentation layer renders from. Intents are plain method calls;
//! every asynchronous one runs through
//! [`collect_status`](crate::domain::collect_status) so the busy flag
//! and failure messages stay consistent no matter how many intents are
//! in flight.

pub mod auth;
pub mod homepage;
pub mod item_detail;
pub mod library;
pub mod search;

pub use auth::{AuthController, AuthData};
pub use homepage::{HomeData, HomepageController};
pub use item_detail::{ItemDetailController, ItemDetailData};
pub use library::{LibraryController, LibraryData};
pub use search::{SearchController, SearchData};
