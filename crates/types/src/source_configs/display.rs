//! Display source configuration types.

use serde::{Deserialize, Serialize};

fn default_backlight_root() -> String {
    "/sys/class/backlight".to_string()
}

fn default_drm_root() -> String {
    "/sys/class/drm".to_string()
}

fn default_fallback_dpi() -> f64 {
    96.0
}

fn default_fallback_refresh_rate() -> f64 {
    60.0
}

/// Display source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySourceConfig {
    #[serde(default = "default_backlight_root")]
    pub backlight_root: String,
    #[serde(default = "default_drm_root")]
    pub drm_root: String,
    /// Used when the connector has no usable EDID size
    #[serde(default = "default_fallback_dpi")]
    pub fallback_dpi: f64,
    #[serde(default = "default_fallback_refresh_rate")]
    pub fallback_refresh_rate: f64,
}

impl Default for DisplaySourceConfig {
    fn default() -> Self {
        Self {
            backlight_root: default_backlight_root(),
            drm_root: default_drm_root(),
            fallback_dpi: default_fallback_dpi(),
            fallback_refresh_rate: default_fallback_refresh_rate(),
        }
    }
}
