//! Application configuration

use anyhow::{Context, Result};
use devreport_core::constants::REFRESH_INTERVAL;
use devreport_sources::SourceConfigs;
use devreport_types::{
    BatterySourceConfig, DeviceSourceConfig, DisplaySourceConfig, PerformanceSourceConfig,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_refresh_interval_ms() -> u64 {
    REFRESH_INTERVAL.as_millis() as u64
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub window: WindowConfig,
    /// Period of the performance and display refreshes
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default)]
    pub battery: BatterySourceConfig,
    #[serde(default)]
    pub device: DeviceSourceConfig,
    #[serde(default)]
    pub performance: PerformanceSourceConfig,
    #[serde(default)]
    pub display: DisplaySourceConfig,
}

impl AppConfig {
    /// Load configuration from disk, defaults when no file exists yet
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "devreport", "devreport")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    pub fn battery_poll_interval(&self) -> Duration {
        Duration::from_millis(self.battery.poll_interval_ms.max(1))
    }

    pub fn source_configs(&self) -> SourceConfigs {
        SourceConfigs {
            battery: self.battery.clone(),
            device: self.device.clone(),
            performance: self.performance.clone(),
            display: self.display.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            window: WindowConfig::default(),
            refresh_interval_ms: default_refresh_interval_ms(),
            battery: BatterySourceConfig::default(),
            device: DeviceSourceConfig::default(),
            performance: PerformanceSourceConfig::default(),
            display: DisplaySourceConfig::default(),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 900,
        }
    }
}
