use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_API_URL: &str = "https://weather-gcake.zeabur.app/api/weather";
pub const DEFAULT_CITY: &str = "臺南市";

/// Cities and counties offered by the picker, north to south then islands.
pub const CITIES: &[&str] = &[
    "臺北市", "新北市", "基隆市", "桃園市", "新竹市", "新竹縣", "苗栗縣", "臺中市", "彰化縣",
    "南投縣", "雲林縣", "嘉義市", "嘉義縣", "臺南市", "高雄市", "屏東縣", "宜蘭縣", "花蓮縣",
    "臺東縣", "澎湖縣", "金門縣", "連江縣",
];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_api_url = "https://weather-gcake.zeabur.app/api/weather"
/// default_city = "臺南市"
/// min_loading_ms = 1000
/// output = "weather.html"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_api_url: String,
    pub default_city: String,
    pub cities: Vec<String>,
    pub min_loading_ms: u64,
    /// Where the rendered HTML document is written.
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_api_url: DEFAULT_BASE_API_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            cities: CITIES.iter().map(|c| c.to_string()).collect(),
            min_loading_ms: 1000,
            output: PathBuf::from("weather.html"),
        }
    }
}

impl Config {
    pub fn min_loading(&self) -> Duration {
        Duration::from_millis(self.min_loading_ms)
    }

    /// Set the default city, adding it to the picker list if it is new.
    pub fn set_default_city(&mut self, city: &str) -> Result<()> {
        let city = city.trim();
        if city.is_empty() {
            return Err(anyhow!("City name must not be empty"));
        }

        if !self.cities.iter().any(|c| c == city) {
            self.cities.push(city.to_string());
        }
        self.default_city = city.to_string();
        Ok(())
    }

    pub fn set_base_api_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!("API URL must start with http:// or https://, got '{url}'"));
        }
        self.base_api_url = url.to_string();
        Ok(())
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        if cfg.cities.is_empty() {
            return Err(anyhow!("`cities` must list at least one city"));
        }
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherdoor", "weatherdoor")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
