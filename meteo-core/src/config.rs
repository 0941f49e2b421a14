use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    provider::{
        ipapi::DEFAULT_IP_LOOKUP_URL,
        open_meteo::{DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL},
    },
    theme::Theme,
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// theme = "light"
/// timeout_secs = 10
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persisted light/dark choice. Absent until the user first toggles.
    pub theme: Option<Theme>,

    pub geocoding_url: String,
    pub forecast_url: String,
    pub ip_lookup_url: String,

    /// Per-request timeout for every outbound call.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Theme to apply: the stored one, else the environment's.
    pub fn effective_theme(&self, system: Theme) -> Theme {
        Theme::resolve(self.theme, system)
    }

    /// Flip the effective theme and store the result. Returns the new theme.
    pub fn toggle_theme(&mut self, system: Theme) -> Theme {
        let next = self.effective_theme(system).toggled();
        self.theme = Some(next);
        next
    }

    /// Load config from `path`, or defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
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

    /// Save config to `path`, creating parent directories as needed.
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
        let dirs = ProjectDirs::from("dev", "meteo", "meteo")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
