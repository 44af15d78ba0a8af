use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::{provider::openweather::DEFAULT_BASE_URL, tiles::BaseTiles};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// OpenWeather connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// How the rendered map looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Draw the OpenWeather temperature tiles on top of the base layer.
    pub overlay: bool,
    pub base_tiles: BaseTiles,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { overlay: true, base_tiles: BaseTiles::default() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [openweather]
/// api_key = "..."
///
/// [map]
/// overlay = true
/// base_tiles = "osm"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub openweather: OpenWeatherConfig,
    pub map: MapConfig,
}

impl Config {
    /// Load config from disk (or defaults on first run), then apply the
    /// environment override for the API key.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_stored()?;
        cfg.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Exactly what is on disk, without environment overrides. Use this when
    /// the result may be saved back.
    pub fn load_stored() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load from an explicit path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
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
        let dirs = ProjectDirs::from("dev", "weathermap", "weathermap")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn api_key(&self) -> Option<&str> {
        self.openweather
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.openweather.api_key = Some(api_key);
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.apply_env_api_key(&key);
        }
    }

    fn apply_env_api_key(&mut self, value: &str) {
        if !value.trim().is_empty() {
            self.set_api_key(value.trim().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_openweather_with_overlay() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.openweather.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.openweather.timeout_secs, 10);
        assert!(cfg.map.overlay);
        assert_eq!(cfg.map.base_tiles, BaseTiles::EsriLightGray);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key(), None);

        cfg.set_api_key(" KEY ".into());
        assert_eq!(cfg.api_key(), Some("KEY"));
    }

    #[test]
    fn env_override_replaces_stored_key_unless_blank() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        cfg.apply_env_api_key("");
        assert_eq!(cfg.api_key(), Some("STORED"));

        cfg.apply_env_api_key("FROM_ENV");
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));
    }

    #[test]
    fn env_override_never_reaches_the_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut stored = Config::default();
        stored.set_api_key("STORED".into());
        stored.save_to(&path).unwrap();

        let mut effective = Config::load_from(&path).unwrap();
        effective.apply_env_overrides(|name| (name == API_KEY_ENV).then(|| "FROM_ENV".to_string()));
        assert_eq!(effective.api_key(), Some("FROM_ENV"));

        // What `configure` edits and saves back is the on-disk value.
        let mut edited = Config::load_from(&path).unwrap();
        assert_eq!(edited.api_key(), Some("STORED"));
        edited.map.overlay = false;
        edited.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap().api_key(), Some("STORED"));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [openweather]
            api_key = "KEY"

            [map]
            base_tiles = "osm"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api_key(), Some("KEY"));
        assert_eq!(cfg.openweather.timeout_secs, 10);
        assert!(cfg.map.overlay);
        assert_eq!(cfg.map.base_tiles, BaseTiles::Osm);
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.map.overlay = false;
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
