use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::endpoint::Endpoint;
use crate::catalog::store::CatalogSource;
use crate::model::config::MarketConfig;
use crate::model::record::{Downloads, PluginRecord};
use crate::model::response::Pagination;

/// Failure inside the adapter's read path. Absorbed before the public
/// boundary: callers of [`StaticDataSource::fetch`] only ever see fallback
/// payloads, never this type.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("resource unavailable: {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed document: {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SourceError::Unavailable {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        SourceError::Malformed {
            path: path.into(),
            source,
        }
    }
}

/// Listing-shaped document: `plugins.json` and `search_example.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListDocument {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<PluginRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl ListDocument {
    pub fn empty() -> Self {
        ListDocument {
            success: true,
            data: Vec::new(),
            total: Some(0),
            pagination: None,
        }
    }
}

/// Per-plugin document: `plugin_{id}.json`. `data` is absent on rejection
/// documents, and `message` is whatever the publisher chose to say.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailDocument {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PluginRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DetailDocument {
    /// The documented stand-in for a missing per-plugin file.
    pub fn placeholder() -> Self {
        DetailDocument {
            success: true,
            data: Some(PluginRecord {
                id: "default".to_string(),
                name: "默认插件".to_string(),
                description: "这是一个默认插件描述".to_string(),
                author: "系统".to_string(),
                version: "1.0.0".to_string(),
                downloads: Downloads::default(),
                category: String::new(),
                image: None,
                filename: None,
                url: None,
            }),
            message: None,
        }
    }
}

/// Synthetic download acknowledgement used when no per-plugin file backs a
/// download request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadDocument {
    pub success: bool,
    pub message: String,
    pub download_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl DownloadDocument {
    pub fn generated(name: &str) -> Self {
        DownloadDocument {
            success: true,
            message: format!("插件 {name} 下载链接已生成"),
            download_url: format!("/Plugin/{name}.zip"),
            filename: None,
        }
    }
}

/// Marketplace-wide download counters, pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadStats {
    pub total_downloads: String,
    pub daily_downloads: String,
    pub monthly_downloads: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDocument {
    pub success: bool,
    pub data: DownloadStats,
}

impl StatsDocument {
    pub fn placeholder() -> Self {
        StatsDocument {
            success: true,
            data: DownloadStats {
                total_downloads: "100,000".to_string(),
                daily_downloads: "1,234".to_string(),
                monthly_downloads: "36,543".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularEntry {
    pub name: String,
    pub downloads: Downloads,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularDocument {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<PopularEntry>,
}

impl PopularDocument {
    pub fn placeholder() -> Self {
        let entry = |name: &str, downloads: &str| PopularEntry {
            name: name.to_string(),
            downloads: Downloads::Formatted(downloads.to_string()),
        };
        PopularDocument {
            success: true,
            data: vec![
                entry("Popular Plugin 1", "50,000"),
                entry("Popular Plugin 2", "45,000"),
                entry("Popular Plugin 3", "40,000"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    pub is_logged_in: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    pub success: bool,
    pub data: UserInfo,
}

impl UserDocument {
    /// The marketplace has no accounts; user routes always answer with
    /// this logged-in demo identity.
    pub fn demo() -> Self {
        UserDocument {
            success: true,
            data: UserInfo {
                username: "demo".to_string(),
                is_logged_in: true,
            },
        }
    }
}

/// Everything a fetch can settle to. There is no error variant: transport
/// and parse failures collapse into the route's fallback payload before
/// this type is built.
///
/// A download request that finds its per-plugin file yields `Detail` (the
/// resource is the detail document); the synthetic `Download`
/// acknowledgement only appears as the fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    List(ListDocument),
    Detail(DetailDocument),
    Download(DownloadDocument),
    Stats(StatsDocument),
    Popular(PopularDocument),
    User(UserDocument),
    /// Raw pass-through for non-JSON resources.
    Text(String),
}

/// Reads pre-generated marketplace documents from a static data directory.
#[derive(Debug, Clone)]
pub struct StaticDataSource {
    root: PathBuf,
}

impl StaticDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        StaticDataSource { root: root.into() }
    }

    pub fn from_config(config: &MarketConfig) -> Self {
        Self::new(config.data_root())
    }

    /// Resolve and serve an endpoint. Cannot fail: a missing or malformed
    /// resource is logged and replaced by the route's fallback payload.
    pub fn fetch(&self, endpoint: &str) -> ApiPayload {
        let route = Endpoint::resolve(endpoint);
        match self.read(&route) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("fetch {endpoint} failed: {err}");
                fallback(&route)
            }
        }
    }

    // -- Typed wrappers over `fetch`, one per marketplace operation.

    pub fn plugin_list(&self) -> ListDocument {
        match self.fetch("/plugins") {
            ApiPayload::List(doc) => doc,
            _ => ListDocument::empty(),
        }
    }

    pub fn search_results(&self, query: &str) -> ListDocument {
        match self.fetch(&format!("/plugins/search?query={query}")) {
            ApiPayload::List(doc) => doc,
            _ => ListDocument::empty(),
        }
    }

    pub fn plugin_details(&self, name: &str) -> DetailDocument {
        match self.fetch(&format!("/plugins/{name}")) {
            ApiPayload::Detail(doc) => doc,
            _ => DetailDocument::placeholder(),
        }
    }

    pub fn download_plugin(&self, name: &str) -> ApiPayload {
        self.fetch(&format!("/plugins/{name}/download"))
    }

    pub fn download_stats(&self) -> StatsDocument {
        match self.fetch("/stats/downloads") {
            ApiPayload::Stats(doc) => doc,
            _ => StatsDocument::placeholder(),
        }
    }

    pub fn popular_plugins(&self) -> PopularDocument {
        match self.fetch("/stats/popular") {
            ApiPayload::Popular(doc) => doc,
            _ => PopularDocument::placeholder(),
        }
    }

    pub fn user_info(&self) -> UserDocument {
        match self.fetch("/user/info") {
            ApiPayload::User(doc) => doc,
            _ => UserDocument::demo(),
        }
    }

    fn read(&self, route: &Endpoint) -> Result<ApiPayload, SourceError> {
        let Some(file) = route.resource() else {
            // User routes short-circuit without touching disk.
            return Ok(ApiPayload::User(UserDocument::demo()));
        };

        let path = self.root.join(file);
        let raw =
            fs::read_to_string(&path).map_err(|err| SourceError::unavailable(&path, err))?;

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            return Ok(ApiPayload::Text(raw));
        }

        let malformed = |err| SourceError::malformed(&path, err);
        let payload = match route {
            Endpoint::Listing | Endpoint::Search | Endpoint::Fallthrough => {
                ApiPayload::List(serde_json::from_str(&raw).map_err(malformed)?)
            }
            Endpoint::Detail { .. } | Endpoint::Download { .. } => {
                ApiPayload::Detail(serde_json::from_str(&raw).map_err(malformed)?)
            }
            Endpoint::DownloadStats => {
                ApiPayload::Stats(serde_json::from_str(&raw).map_err(malformed)?)
            }
            Endpoint::Popular => {
                ApiPayload::Popular(serde_json::from_str(&raw).map_err(malformed)?)
            }
            Endpoint::User => ApiPayload::User(UserDocument::demo()),
        };

        Ok(payload)
    }
}

impl CatalogSource for StaticDataSource {
    fn fetch_catalog(&self) -> Result<Vec<PluginRecord>, SourceError> {
        Ok(self.plugin_list().data)
    }
}

/// The documented substitute payload for each route.
fn fallback(route: &Endpoint) -> ApiPayload {
    match route {
        Endpoint::Listing | Endpoint::Search | Endpoint::Fallthrough => {
            ApiPayload::List(ListDocument::empty())
        }
        Endpoint::Detail { .. } => ApiPayload::Detail(DetailDocument::placeholder()),
        Endpoint::Download { id } => ApiPayload::Download(DownloadDocument::generated(id)),
        Endpoint::DownloadStats => ApiPayload::Stats(StatsDocument::placeholder()),
        Endpoint::Popular => ApiPayload::Popular(PopularDocument::placeholder()),
        Endpoint::User => ApiPayload::User(UserDocument::demo()),
    }
}
