use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::record::{ALL_CATEGORIES, PluginRecord};
use crate::model::response::Pagination;

/// How many records `stats` ranks as popular.
pub const POPULAR_COUNT: usize = 3;

/// Sort dimension. `Latest` is the default and the interpretation of any
/// unrecognized key; with no timestamp in the data it orders by `id`,
/// which is best-effort recency at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    Downloads,
    Version,
    #[default]
    Latest,
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match value {
            "name" => SortKey::Name,
            "downloads" => SortKey::Downloads,
            "version" => SortKey::Version,
            _ => SortKey::Latest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Self {
        if value == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

/// One listing page plus its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub data: Vec<PluginRecord>,
    pub pagination: Pagination,
}

/// Catalog-wide aggregates, shaped like the generated `stats.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_downloads: u64,
    pub total_plugins: usize,
    pub popular_plugins: Vec<PluginRecord>,
    pub category_counts: BTreeMap<String, usize>,
}

/// Case-insensitive substring match across `name`, `description`, and
/// `author`. An empty query returns the full input; match order is input
/// order.
pub fn search(plugins: &[PluginRecord], query: &str) -> Vec<PluginRecord> {
    if query.is_empty() {
        return plugins.to_vec();
    }

    let needle = query.to_lowercase();
    plugins
        .iter()
        .filter(|plugin| {
            plugin.name.to_lowercase().contains(&needle)
                || plugin.description.to_lowercase().contains(&needle)
                || plugin.author.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Exact, case-sensitive category equality. The `"all"` sentinel bypasses
/// filtering entirely.
pub fn filter_by_category(plugins: &[PluginRecord], category: &str) -> Vec<PluginRecord> {
    if category == ALL_CATEGORIES {
        return plugins.to_vec();
    }

    plugins
        .iter()
        .filter(|plugin| plugin.category == category)
        .cloned()
        .collect()
}

/// Stable sort over a copy of the input; ties keep their relative input
/// order in both directions.
///
/// `Downloads` compares normalized counts (digit-strip for formatted
/// strings). `Version` compares raw strings, so `"10.0.0"` sorts before
/// `"2.0.0"`; callers wanting semantic ordering need a different key.
pub fn sort(plugins: &[PluginRecord], key: SortKey, order: SortOrder) -> Vec<PluginRecord> {
    let mut sorted = plugins.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Downloads => a.downloads.count().cmp(&b.downloads.count()),
            SortKey::Version => a.version.cmp(&b.version),
            SortKey::Latest => a.id.cmp(&b.id),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// 1-indexed slice `[(page-1)*limit, page*limit)`. Out-of-range pages
/// (including page 0 and a zero limit) yield an empty slice, never an
/// error.
pub fn paginate(plugins: &[PluginRecord], page: usize, limit: usize) -> Page {
    let total = plugins.len();
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };

    let data = if page == 0 || limit == 0 {
        Vec::new()
    } else {
        let start = (page - 1).saturating_mul(limit).min(total);
        let end = page.saturating_mul(limit).min(total);
        plugins[start..end].to_vec()
    };

    Page {
        data,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
        },
    }
}

/// Top `count` records by normalized download count, descending.
pub fn top_by_downloads(plugins: &[PluginRecord], count: usize) -> Vec<PluginRecord> {
    let mut ranked = plugins.to_vec();
    ranked.sort_by(|a, b| b.downloads.count().cmp(&a.downloads.count()));
    ranked.truncate(count);
    ranked
}

/// Leading slice of the catalog, the front page's "featured" strip.
pub fn featured(plugins: &[PluginRecord], count: usize) -> Vec<PluginRecord> {
    plugins.iter().take(count).cloned().collect()
}

/// Aggregates over the full catalog: summed normalized downloads,
/// per-category counts, and the top-[`POPULAR_COUNT`] by downloads.
pub fn stats(plugins: &[PluginRecord]) -> CatalogStats {
    let total_downloads = plugins.iter().map(|p| p.downloads.count()).sum();

    let mut category_counts = BTreeMap::new();
    for plugin in plugins {
        *category_counts.entry(plugin.category.clone()).or_insert(0) += 1;
    }

    CatalogStats {
        total_downloads,
        total_plugins: plugins.len(),
        popular_plugins: top_by_downloads(plugins, POPULAR_COUNT),
        category_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Downloads;

    fn record(id: &str, name: &str) -> PluginRecord {
        PluginRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            author: String::new(),
            version: "1.0.0".to_string(),
            downloads: Downloads::Count(0),
            category: "tool".to_string(),
            image: None,
            filename: None,
            url: None,
        }
    }

    fn catalog() -> Vec<PluginRecord> {
        vec![
            PluginRecord {
                description: "专业级暗黑主题".to_string(),
                author: "GB Team".to_string(),
                version: "1.2.0".to_string(),
                downloads: Downloads::Count(12456),
                category: "theme".to_string(),
                ..record("dark-theme-pro", "Dark Theme Pro")
            },
            PluginRecord {
                description: "常用代码片段库".to_string(),
                author: "DeveloperX".to_string(),
                version: "2.1.0".to_string(),
                downloads: Downloads::Count(8732),
                ..record("code-snippets", "Code Snippets")
            },
            PluginRecord {
                description: "高级调试工具".to_string(),
                author: "BugHunter".to_string(),
                version: "1.5.3".to_string(),
                downloads: Downloads::Count(5689),
                category: "debug".to_string(),
                ..record("debug-helper", "Debug Helper")
            },
            PluginRecord {
                description: "Python语言支持".to_string(),
                author: "PyExpert".to_string(),
                downloads: Downloads::Count(2345),
                category: "language".to_string(),
                ..record("python-support", "Python Support")
            },
        ]
    }

    #[test]
    fn search_matches_name_description_and_author() {
        let plugins = catalog();

        let by_name = search(&plugins, "dark");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "dark-theme-pro");

        let by_description = search(&plugins, "调试");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, "debug-helper");

        let by_author = search(&plugins, "pyexpert");
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].id, "python-support");
    }

    #[test]
    fn search_empty_query_returns_full_catalog() {
        let plugins = catalog();
        assert_eq!(search(&plugins, ""), plugins);
    }

    #[test]
    fn search_preserves_insertion_order() {
        let plugins = catalog();
        // "e" hits every record; order must match the input.
        let hits = search(&plugins, "e");
        let ids: Vec<&str> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            ["dark-theme-pro", "code-snippets", "debug-helper", "python-support"]
        );
    }

    #[test]
    fn filter_all_sentinel_bypasses() {
        let plugins = catalog();
        assert_eq!(filter_by_category(&plugins, ALL_CATEGORIES), plugins);
    }

    #[test]
    fn filter_is_exact_and_case_sensitive() {
        let plugins = catalog();
        assert_eq!(filter_by_category(&plugins, "theme").len(), 1);
        assert!(filter_by_category(&plugins, "Theme").is_empty());
        assert!(filter_by_category(&plugins, "them").is_empty());
    }

    #[test]
    fn sort_by_name_is_case_insensitive() {
        let plugins = vec![record("1", "banana"), record("2", "Apple")];
        let sorted = sort(&plugins, SortKey::Name, SortOrder::Asc);
        assert_eq!(sorted[0].name, "Apple");
    }

    #[test]
    fn sort_downloads_mixes_counts_and_strings() {
        let plugins = vec![
            PluginRecord {
                downloads: Downloads::Formatted("1,200".to_string()),
                ..record("a", "A")
            },
            PluginRecord {
                downloads: Downloads::Count(500),
                ..record("b", "B")
            },
        ];

        let sorted = sort(&plugins, SortKey::Downloads, SortOrder::Desc);
        assert_eq!(sorted[0].name, "A"); // 1200 > 500
        assert_eq!(sorted[1].name, "B");
    }

    #[test]
    fn sort_version_is_raw_lexical() {
        let plugins = vec![
            PluginRecord {
                version: "10.0.0".to_string(),
                ..record("a", "A")
            },
            PluginRecord {
                version: "2.0.0".to_string(),
                ..record("b", "B")
            },
        ];

        let sorted = sort(&plugins, SortKey::Version, SortOrder::Asc);
        assert_eq!(sorted[0].version, "10.0.0");
    }

    #[test]
    fn sort_is_stable_for_equal_keys_both_directions() {
        let plugins = vec![
            record("3", "same"),
            record("1", "same"),
            record("2", "same"),
        ];

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let sorted = sort(&plugins, SortKey::Name, order);
            let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, ["3", "1", "2"]);
        }
    }

    #[test]
    fn unknown_sort_key_parses_as_latest() {
        assert_eq!(SortKey::parse("downloads"), SortKey::Downloads);
        assert_eq!(SortKey::parse("popularity"), SortKey::Latest);
        assert_eq!(SortKey::parse(""), SortKey::Latest);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("anything"), SortOrder::Desc);
    }

    #[test]
    fn paginate_slices_and_describes() {
        let plugins: Vec<PluginRecord> = (1..=25)
            .map(|i| record(&format!("p{i:02}"), &format!("Plugin {i}")))
            .collect();

        let page = paginate(&plugins, 2, 20);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.data[0].id, "p21");
        assert_eq!(
            page.pagination,
            Pagination {
                page: 2,
                limit: 20,
                total: 25,
                total_pages: 2,
            }
        );
    }

    #[test]
    fn paginate_out_of_range_is_empty_not_an_error() {
        let plugins: Vec<PluginRecord> =
            (1..=5).map(|i| record(&format!("p{i}"), "P")).collect();

        assert!(paginate(&plugins, 3, 5).data.is_empty());
        assert!(paginate(&plugins, 0, 5).data.is_empty());
        assert!(paginate(&plugins, 99, 5).data.is_empty());
        assert_eq!(paginate(&plugins, 3, 5).pagination.total_pages, 1);
    }

    #[test]
    fn paginate_zero_limit_is_empty() {
        let plugins = catalog();
        let page = paginate(&plugins, 1, 0);
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.total, 4);
    }

    #[test]
    fn paginate_total_pages_matches_ceil() {
        let plugins: Vec<PluginRecord> =
            (1..=41).map(|i| record(&format!("p{i}"), "P")).collect();
        assert_eq!(paginate(&plugins, 1, 20).pagination.total_pages, 3);
        assert_eq!(paginate(&plugins, 1, 41).pagination.total_pages, 1);
    }

    #[test]
    fn stats_aggregates_catalog() {
        let aggregates = stats(&catalog());

        assert_eq!(aggregates.total_downloads, 12456 + 8732 + 5689 + 2345);
        assert_eq!(aggregates.total_plugins, 4);
        assert_eq!(aggregates.popular_plugins.len(), 3);
        assert_eq!(aggregates.popular_plugins[0].id, "dark-theme-pro");
        assert_eq!(aggregates.category_counts["theme"], 1);
        assert_eq!(aggregates.category_counts["tool"], 1);
        assert_eq!(aggregates.category_counts.len(), 4);
    }

    #[test]
    fn featured_takes_leading_slice() {
        let picks = featured(&catalog(), 3);
        assert_eq!(picks.len(), 3);
        assert_eq!(picks[0].id, "dark-theme-pro");
    }
}
