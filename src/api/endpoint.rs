/// Logical route resolved from a raw endpoint string.
///
/// Matching order mirrors the front end's probe order: search before
/// download, download before detail, detail before the bare listing.
/// Query strings are part of the raw text, so `/plugins?page=2` lands in
/// `Fallthrough`, which serves the same listing file anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Listing,
    Search,
    Detail { id: String },
    Download { id: String },
    DownloadStats,
    Popular,
    User,
    /// Anything unrecognized falls back to the listing file.
    Fallthrough,
}

impl Endpoint {
    pub fn resolve(raw: &str) -> Self {
        if raw.contains("/plugins/search") {
            Endpoint::Search
        } else if raw.starts_with("/plugins/") && raw.contains("/download") {
            let rest = &raw["/plugins/".len()..];
            let id = rest.split("/download").next().unwrap_or(rest);
            Endpoint::Download { id: id.to_string() }
        } else if let Some(id) = raw.strip_prefix("/plugins/") {
            Endpoint::Detail { id: id.to_string() }
        } else if raw == "/plugins" {
            Endpoint::Listing
        } else if raw.contains("/stats/downloads") {
            Endpoint::DownloadStats
        } else if raw.contains("/stats/popular") {
            Endpoint::Popular
        } else if raw == "/user/login" || raw == "/user/info" {
            Endpoint::User
        } else {
            Endpoint::Fallthrough
        }
    }

    /// File name under the static data root; `None` for short-circuited
    /// routes that never touch disk.
    pub fn resource(&self) -> Option<String> {
        match self {
            Endpoint::Listing | Endpoint::Fallthrough => Some("plugins.json".to_string()),
            Endpoint::Search => Some("search_example.json".to_string()),
            Endpoint::Detail { id } | Endpoint::Download { id } => {
                Some(format!("plugin_{id}.json"))
            }
            Endpoint::DownloadStats => Some("download_stats.json".to_string()),
            Endpoint::Popular => Some("popular_plugins.json".to_string()),
            Endpoint::User => None,
        }
    }
}
