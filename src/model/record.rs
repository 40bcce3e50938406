use serde::{Deserialize, Serialize};

/// Reserved category value meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Download counter as it appears in catalog documents: either a raw count
/// or a pre-formatted display string such as `"1,234"` or `"10,000+"`.
///
/// Both shapes occur in the wild, so every numeric consumer goes through
/// [`Downloads::count`] instead of touching the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Downloads {
    Count(u64),
    Formatted(String),
}

impl Default for Downloads {
    fn default() -> Self {
        Downloads::Count(0)
    }
}

impl Downloads {
    /// Normalized numeric value. Formatted strings keep ASCII digits only,
    /// so `"1,234"` reads as 1234 while `"1.5M"` degrades to 15, a known
    /// precision loss kept for compatibility with existing catalog data.
    /// Digit-free strings normalize to 0.
    pub fn count(&self) -> u64 {
        match self {
            Downloads::Count(n) => *n,
            Downloads::Formatted(text) => {
                let digits: String = text.chars().filter(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            }
        }
    }

    /// Card display form: 1_500_000 → `"1.5M"`, 1_200 → `"1.2K"`, smaller
    /// counts verbatim. Pre-formatted strings pass through unchanged.
    pub fn display(&self) -> String {
        match self {
            Downloads::Formatted(text) => text.clone(),
            Downloads::Count(n) if *n >= 1_000_000 => {
                format!("{:.1}M", *n as f64 / 1_000_000.0)
            }
            Downloads::Count(n) if *n >= 1_000 => format!("{:.1}K", *n as f64 / 1_000.0),
            Downloads::Count(n) => n.to_string(),
        }
    }
}

/// One catalog entry.
///
/// `id` is the canonical lookup key. `name` doubles as the install-command
/// argument; the catalog does not enforce uniqueness for either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub downloads: Downloads,
    #[serde(default)]
    pub category: String,
    // Presentation/location metadata, round-tripped but never queried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
