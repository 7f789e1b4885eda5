//! Catalog data layer: domain models, the remote archive client, the
//! response mappers, and the local watch-broadcast repositories.

pub mod api;
pub mod mappers;
pub mod models;
pub mod repo;

pub use api::{ApiError, ArchiveClient, CatalogApi};
pub use models::{
    Homepage, Item, ItemDetail, ItemFile, ItemRail, MediaType, SearchFilter, SearchQuery, User,
};
pub use repo::{AccountRepository, FavoritesRepository, ItemRepository, RecentSearchRepository};
