use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::assets::DisplayLocale;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// debounce_ms = 400
/// min_query_chars = 2
/// locale = "ru"
/// fake_latency_ms = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quiet period after the last keystroke before a location lookup is issued.
    pub debounce_ms: u64,

    /// Queries of this many characters or fewer never trigger a lookup.
    pub min_query_chars: usize,

    pub locale: DisplayLocale,

    /// Artificial delay applied by the built-in search and fetch collaborators.
    pub fake_latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self { debounce_ms: 400, min_query_chars: 2, locale: DisplayLocale::Ru, fake_latency_ms: 0 }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn fake_latency(&self) -> Duration {
        Duration::from_millis(self.fake_latency_ms)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
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
        let dirs = ProjectDirs::from("dev", "weather-view", "weather-view")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms > 10_000 {
            return Err(anyhow!(
                "debounce_ms = {} is too long.\n\
                 Hint: keep the search delay at or below 10000 ms.",
                self.debounce_ms
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_screen() {
        let cfg = Config::default();

        assert_eq!(cfg.debounce(), Duration::from_millis(400));
        assert_eq!(cfg.min_query_chars, 2);
        assert_eq!(cfg.locale, DisplayLocale::Ru);
        assert_eq!(cfg.fake_latency(), Duration::ZERO);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = Config::from_toml("locale = \"en\"\n").expect("partial config must parse");

        assert_eq!(cfg.locale, DisplayLocale::En);
        assert_eq!(cfg.debounce_ms, 400);
        assert_eq!(cfg.min_query_chars, 2);
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert!(Config::from_toml("locale = \"de\"\n").is_err());
    }

    #[test]
    fn overly_long_debounce_is_rejected() {
        let err = Config::from_toml("debounce_ms = 60000\n").unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let cfg = Config { debounce_ms: 250, min_query_chars: 3, locale: DisplayLocale::En, fake_latency_ms: 50 };

        let text = toml::to_string_pretty(&cfg).expect("config serializes");
        let parsed = Config::from_toml(&text).expect("config parses");

        assert_eq!(parsed, cfg);
    }
}
