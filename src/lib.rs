//! Catalog core for the GB plugin marketplace.
//!
//! Holds the in-memory plugin catalog, the pure query operations over it
//! (search, category filter, sort, paginate, aggregate stats), the
//! static-file data source with its fallback chain, and the simulated
//! install workflow. Rendering, clipboard, and notifications are the
//! embedding UI's job; it observes install progress through
//! [`install::InstallNotifier`] and reads query results as plain data.

pub mod api;
pub mod catalog;
pub mod install;
pub mod market;
pub mod model;

pub use api::StaticDataSource;
pub use catalog::{CatalogSource, CatalogStore, SortKey, SortOrder};
pub use install::{InstallNotifier, InstallOutcome, InstallStatus, Installer, validate_plugin_name};
pub use market::Marketplace;
pub use model::{ALL_CATEGORIES, Downloads, MarketConfig, PluginRecord, QueryResult};
