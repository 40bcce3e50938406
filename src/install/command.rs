use std::sync::LazyLock;

use regex::Regex;

static PLUGIN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,50}$").expect("valid plugin name regex"));

/// Accepts exactly the install-command identifier alphabet, 1–50 chars.
pub fn validate_plugin_name(name: &str) -> bool {
    PLUGIN_NAME_RE.is_match(name)
}

/// Fixed install-command template.
pub fn build_command(cli: &str, name: &str) -> String {
    format!("{cli} install {name}")
}

/// Grammar for one CLI name: `<cli> install <identifier>`, case-insensitive,
/// nothing before or after.
pub fn command_regex(cli: &str) -> Regex {
    let pattern = format!(r"(?i)^{}\s+install\s+([A-Za-z0-9_-]+)$", regex::escape(cli));
    Regex::new(&pattern).expect("valid install command regex")
}
