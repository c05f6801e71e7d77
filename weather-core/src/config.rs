use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::{Path, PathBuf}, time::Duration};

use crate::location::{Location, LocationRegistry};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_USER_AGENT: &str = "WeatherApp/1.0";
pub const DEFAULT_BASE_URL: &str = "https://api.met.no/weatherapi/locationforecast/2.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Extra registry entry from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub lat: f64,
    pub lon: f64,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// port = 3000
/// user_agent = "MyWeather/2.0 me@example.com"
///
/// [locations."Tromsø"]
/// lat = 69.6492
/// lon = 18.9553
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port the HTTP server listens on.
    pub port: u16,

    /// Sent as `User-Agent` on every met.no request.
    pub user_agent: String,

    /// Locationforecast base URL, without the `/compact` suffix.
    pub base_url: String,

    /// Outbound request timeout.
    pub timeout_secs: u64,

    /// Added to (or overriding) the built-in locations.
    pub locations: BTreeMap<String, LocationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            locations: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load config from disk, then apply `PORT` / `USER_AGENT` from the environment.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file(&Self::config_file_path()?)?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Read a config file, or return defaults if it doesn't exist yet.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Override fields from environment variables, looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = var("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port:?}"))?;
        }

        if let Some(user_agent) = var("USER_AGENT").filter(|ua| !ua.trim().is_empty()) {
            self.user_agent = user_agent;
        }

        Ok(())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
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
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Built-in locations plus the ones from `[locations]`.
    pub fn registry(&self) -> LocationRegistry {
        let mut registry = LocationRegistry::builtin();
        for (name, coords) in &self.locations {
            registry.insert(Location::new(name.clone(), coords.lat, coords.lon));
        }
        registry
    }

    /// Convenience helper: add or replace a custom location.
    pub fn upsert_location(&mut self, name: impl Into<String>, lat: f64, lon: f64) {
        self.locations.insert(name.into(), LocationConfig { lat, lon });
    }
}
