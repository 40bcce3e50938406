use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct MarketConfig {
    pub data: DataConfig,
    pub catalog: CatalogConfig,
    pub install: InstallConfig,
}

#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// Directory holding the pre-generated marketplace documents.
    pub root: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    pub page_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct InstallConfig {
    /// CLI name used in generated install commands, e.g. `gb install foo`.
    pub cli: String,
}

impl MarketConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let defaults = include_str!("../../config/default.toml");
        let mut config: MarketConfig = toml::from_str(defaults)?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "gb-market") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                let user_str = fs::read_to_string(&config_path)?;
                let user_config: MarketConfig = toml::from_str(&user_str)?;
                config = user_config; // TODO: deep merge instead of full replace
            }
        }

        // Expand ~ in the data root
        if config.data.root.starts_with('~') {
            let home = dirs_home().ok_or_else(|| anyhow!("cannot determine home directory"))?;
            config.data.root = config.data.root.replacen('~', &home.to_string_lossy(), 1);
        }

        Ok(config)
    }

    pub fn data_root(&self) -> PathBuf {
        PathBuf::from(&self.data.root)
    }
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
