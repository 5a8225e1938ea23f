//! Display geometry and brightness

use serde::{Deserialize, Serialize};

/// Brightness value reported when the platform has no readable backlight
pub const BRIGHTNESS_UNSET: i32 = -1;

/// Reference density: 1.0 logical pixel per physical pixel at 160 dpi
pub const DENSITY_DEFAULT: u32 = 160;

/// Display snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInfo {
    /// Raw brightness, or [`BRIGHTNESS_UNSET`]
    pub brightness: i32,
    pub max_brightness: i32,
    pub width: u32,
    pub height: u32,
    pub density_dpi: u32,
    pub density: f64,
    /// Diagonal in inches
    pub screen_size: f64,
    /// Hz
    pub refresh_rate: f64,
}

impl DisplayInfo {
    /// Brightness as a rounded percentage of max, or `None` when unknown
    pub fn brightness_percent(&self) -> Option<u8> {
        if self.brightness < 0 || self.max_brightness <= 0 {
            return None;
        }
        let pct = self.brightness as f64 / self.max_brightness as f64 * 100.0;
        Some(pct.round().clamp(0.0, 100.0) as u8)
    }
}

/// Diagonal size in inches from pixel dimensions and per-axis dpi.
///
/// A non-positive dpi contributes 0 inches on that axis.
pub fn screen_diagonal(width_px: u32, height_px: u32, xdpi: f64, ydpi: f64) -> f64 {
    let width_in = if xdpi > 0.0 { width_px as f64 / xdpi } else { 0.0 };
    let height_in = if ydpi > 0.0 { height_px as f64 / ydpi } else { 0.0 };
    (width_in * width_in + height_in * height_in).sqrt()
}

/// Bucket-free density from per-axis dpi
pub fn density_from_dpi(xdpi: f64, ydpi: f64) -> (u32, f64) {
    let density_dpi = ((xdpi + ydpi) / 2.0).round().max(0.0) as u32;
    (density_dpi, density_dpi as f64 / DENSITY_DEFAULT as f64)
}
