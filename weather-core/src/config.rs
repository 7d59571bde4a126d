use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

/// Provider endpoint used when neither the config file nor an override names one.
pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.weatherapi.com/v1/current.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Values taken from flags or the environment; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Everything the HTTP client needs, validated.
#[derive(Clone, PartialEq)]
pub struct ClientSettings {
    pub api_key: String,
    pub base_url: Url,
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// Store a base URL after checking it is an absolute http(s) URL.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        let url = parse_base_url(base_url)?;
        self.base_url = Some(url.to_string());
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        non_empty(self.api_key.as_deref()).is_some()
    }

    /// Merge overrides over the file values and validate the result.
    pub fn resolve(&self, overrides: &Overrides) -> Result<ClientSettings> {
        let api_key = non_empty(overrides.api_key.as_deref())
            .or_else(|| non_empty(self.api_key.as_deref()))
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `weather configure` or set WEATHER_API_KEY."
                )
            })?;

        let base_url = non_empty(overrides.base_url.as_deref())
            .or_else(|| non_empty(self.base_url.as_deref()))
            .unwrap_or(DEFAULT_BASE_URL);

        Ok(ClientSettings { api_key: api_key.to_string(), base_url: parse_base_url(base_url)? })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid base URL '{raw}'"))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("Invalid base URL '{raw}': unsupported scheme '{other}'"),
    }
}
