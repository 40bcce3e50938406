use std::cell::{Cell, RefCell};

use crate::api::SourceError;
use crate::model::record::{Downloads, PluginRecord};
use crate::model::response::QueryResult;

/// Where catalog records come from. The production implementation is the
/// static-file adapter; tests substitute in-memory sources.
pub trait CatalogSource {
    fn fetch_catalog(&self) -> Result<Vec<PluginRecord>, SourceError>;
}

/// Shared, single-threaded catalog of plugin records.
///
/// Hydrated once per load cycle; every query works on a snapshot copy, so
/// the stored sequence is never mutated after load. The `loading` flag is
/// the only guard state: a load requested while one is in flight is
/// dropped, not queued.
#[derive(Debug, Default)]
pub struct CatalogStore {
    plugins: RefCell<Vec<PluginRecord>>,
    loading: Cell<bool>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate the catalog from `source`.
    ///
    /// Re-entrant calls while a load is in flight return immediately
    /// without effect. A source error or an empty result falls back to the
    /// built-in default set; neither is reported to the caller. No borrow
    /// is held across the source call, so a source may itself call back
    /// into this store.
    pub fn load(&self, source: &dyn CatalogSource) {
        if self.loading.get() {
            tracing::debug!("catalog load already in flight, dropping request");
            return;
        }
        self.loading.set(true);

        let records = match source.fetch_catalog() {
            Ok(records) if !records.is_empty() => {
                tracing::info!("catalog hydrated with {} plugins", records.len());
                records
            }
            Ok(_) => {
                tracing::warn!("catalog source returned no records, using default set");
                default_catalog()
            }
            Err(err) => {
                tracing::warn!("catalog load failed: {err}, using default set");
                default_catalog()
            }
        };

        *self.plugins.borrow_mut() = records;
        self.loading.set(false);
    }

    /// Current catalog snapshot. Queries operate on the copy, never the
    /// shared sequence.
    pub fn snapshot(&self) -> Vec<PluginRecord> {
        self.plugins.borrow().clone()
    }

    /// Linear scan on `id`, first match wins.
    pub fn get_by_id(&self, id: &str) -> Option<PluginRecord> {
        self.plugins.borrow().iter().find(|p| p.id == id).cloned()
    }

    /// Case-insensitive scan on `name`, the install path's lookup, where
    /// the display name is the only key the caller holds.
    pub fn find_by_name(&self, name: &str) -> Option<PluginRecord> {
        let needle = name.to_lowercase();
        self.plugins
            .borrow()
            .iter()
            .find(|p| p.name.to_lowercase() == needle)
            .cloned()
    }

    /// Detail lookup with the listing envelope: `Failure` only when the id
    /// genuinely misses.
    pub fn detail(&self, id: &str) -> QueryResult<PluginRecord> {
        match self.get_by_id(id) {
            Some(record) => QueryResult::success(record),
            None => QueryResult::failure("插件未找到"),
        }
    }

    pub fn len(&self) -> usize {
        self.plugins.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.borrow().is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }
}

/// Fixed fallback set used when no source data is available.
pub fn default_catalog() -> Vec<PluginRecord> {
    vec![PluginRecord {
        id: "gb-parser".to_string(),
        name: "gb_parser".to_string(),
        description: "GB语言解析器插件".to_string(),
        author: "GB Team".to_string(),
        version: "1.0.0".to_string(),
        downloads: Downloads::Count(100),
        category: "core".to_string(),
        image: Some("https://via.placeholder.com/300x160?text=GB+Parser".to_string()),
        filename: Some("gb_parser.py".to_string()),
        url: Some("../Plugin/gb_parser.py".to_string()),
    }]
}
