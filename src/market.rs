use crate::api::adapter::{PopularEntry, StaticDataSource};
use crate::catalog::query::{self, CatalogStats, Page, SortKey, SortOrder};
use crate::catalog::store::CatalogStore;
use crate::install::workflow::{InstallNotifier, InstallOutcome, Installer};
use crate::model::config::MarketConfig;
use crate::model::record::PluginRecord;
use crate::model::response::QueryResult;

/// How many records the front page features.
const FEATURED_COUNT: usize = 3;

/// Composition root companion: one explicitly constructed marketplace
/// wiring a catalog store, a static data source, and an installer. The UI
/// layer owns an instance and passes it by reference; nothing here is
/// process-global.
#[derive(Debug)]
pub struct Marketplace {
    store: CatalogStore,
    source: StaticDataSource,
    installer: Installer,
    page_size: usize,
}

impl Marketplace {
    pub fn new(config: &MarketConfig) -> Self {
        Marketplace {
            store: CatalogStore::new(),
            source: StaticDataSource::from_config(config),
            installer: Installer::from_config(config),
            page_size: config.catalog.page_size,
        }
    }

    /// Populate the catalog from the data source. Safe to call again; an
    /// overlapping request while one is in flight is dropped by the store.
    pub fn hydrate(&self) {
        self.store.load(&self.source);
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn source(&self) -> &StaticDataSource {
        &self.source
    }

    pub fn installer(&self) -> &Installer {
        &self.installer
    }

    /// Full catalog, insertion order.
    pub fn plugins(&self) -> Vec<PluginRecord> {
        self.store.snapshot()
    }

    pub fn search(&self, query: &str) -> QueryResult<Vec<PluginRecord>> {
        let hits = query::search(&self.store.snapshot(), query);
        let total = hits.len();
        QueryResult::with_total(hits, total)
    }

    pub fn by_category(&self, category: &str) -> Vec<PluginRecord> {
        query::filter_by_category(&self.store.snapshot(), category)
    }

    /// The listing pipeline: category filter → sort → configured page size.
    pub fn browse(&self, category: &str, key: SortKey, order: SortOrder, page: usize) -> Page {
        let snapshot = self.store.snapshot();
        let filtered = query::filter_by_category(&snapshot, category);
        let sorted = query::sort(&filtered, key, order);
        query::paginate(&sorted, page, self.page_size)
    }

    pub fn featured(&self) -> Vec<PluginRecord> {
        query::featured(&self.store.snapshot(), FEATURED_COUNT)
    }

    pub fn detail(&self, id: &str) -> QueryResult<PluginRecord> {
        self.store.detail(id)
    }

    pub fn stats(&self) -> CatalogStats {
        query::stats(&self.store.snapshot())
    }

    /// Marketplace-curated popular list, served by the stats endpoint with
    /// its own fallback chain.
    pub fn recommended(&self) -> Vec<PopularEntry> {
        self.source.popular_plugins().data
    }

    pub fn install(&self, name: &str, notifier: &mut dyn InstallNotifier) -> InstallOutcome {
        self.installer.install(name, &self.source, notifier)
    }

    pub fn install_command(&self, name: &str) -> String {
        self.installer.install_command(name)
    }

    pub fn parse_install_command(&self, text: &str) -> Option<String> {
        self.installer.parse_install_command(text)
    }
}
