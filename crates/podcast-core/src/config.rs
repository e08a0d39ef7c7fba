use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::catalog::SortKey;
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Initial sort key, e.g. `"date-desc"`.
    #[serde(default = "default_sort")]
    pub default_sort: String,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Shows per page; `0` derives it from the terminal height.
    #[serde(default)]
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_volume")]
    pub default_volume: f32,
    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: u64,
}

/// Where favourites, the theme preference and the log live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            search_debounce_ms: default_search_debounce_ms(),
            page_size: 0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_volume: default_volume(),
            seek_step_secs: default_seek_step_secs(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_base_url() -> String {
    "https://podcast-api.netlify.app".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("podcasts/{}", env!("CARGO_PKG_VERSION"))
}

fn default_sort() -> String {
    SortKey::DateDesc.key().to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_volume() -> f32 {
    0.7
}

fn default_seek_step_secs() -> u64 {
    10
}

fn default_data_dir() -> PathBuf {
    platform::data_dir()
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl CatalogConfig {
    pub fn sort_key(&self) -> SortKey {
        SortKey::from_key(&self.default_sort)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load `path`, writing defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://podcast-api.netlify.app");
        assert_eq!(config.catalog.sort_key(), SortKey::DateDesc);
        assert_eq!(config.catalog.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.catalog.page_size, 0);
        assert_eq!(config.player.seek_step_secs, 10);
        assert!(config.paths.data_dir.ends_with("podcasts"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://127.0.0.1:8080"

            [catalog]
            default_sort = "title-asc"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.catalog.sort_key(), SortKey::TitleAsc);
        assert_eq!(config.catalog.search_debounce_ms, 300);
    }

    #[test]
    fn first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg").join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.api.timeout_secs, 15);

        let again = Config::load_from(&path).unwrap();
        assert_eq!(again.api.base_url, config.api.base_url);
    }
}
