//! Display brightness and geometry from the backlight and DRM classes

use crate::edid::Edid;
use crate::sysfs::{read_optional, read_parsed, sorted_entries};
use devreport_core::constants::MM_PER_INCH;
use devreport_core::{Accessor, AccessorKind, BridgeError, DisplayAccessor, SourceMetadata};
use devreport_types::{
    density_from_dpi, screen_diagonal, DisplayInfo, DisplaySourceConfig, BRIGHTNESS_UNSET,
};
use log::trace;
use std::fs;
use std::path::Path;

/// Max brightness reported when no backlight exists
const DEFAULT_MAX_BRIGHTNESS: i32 = 255;

/// One connected DRM connector
#[derive(Debug, Clone, PartialEq)]
struct Connector {
    width: u32,
    height: u32,
    edid: Option<Edid>,
}

pub struct LinuxDisplayAccessor {
    metadata: SourceMetadata,
    config: DisplaySourceConfig,
}

impl LinuxDisplayAccessor {
    pub fn new(config: DisplaySourceConfig) -> Self {
        let metadata = SourceMetadata {
            id: "display".to_string(),
            name: "Display".to_string(),
            description: "Brightness, resolution, density, size and refresh rate".to_string(),
        };

        Self { metadata, config }
    }

    /// `(brightness, max_brightness)` of the first backlight, or the sentinel
    fn brightness(&self) -> (i32, i32) {
        let backlight = sorted_entries(Path::new(&self.config.backlight_root))
            .ok()
            .and_then(|dirs| {
                dirs.into_iter().find_map(|dir| {
                    let max = read_parsed::<i32>(&dir.join("max_brightness"))?;
                    let current = read_parsed::<i32>(&dir.join("actual_brightness"))
                        .or_else(|| read_parsed(&dir.join("brightness")))?;
                    Some((current, max))
                })
            });

        backlight.unwrap_or_else(|| {
            trace!("No readable backlight under {}", self.config.backlight_root);
            (BRIGHTNESS_UNSET, DEFAULT_MAX_BRIGHTNESS)
        })
    }

    fn connector(&self) -> Option<Connector> {
        sorted_entries(Path::new(&self.config.drm_root))
            .ok()?
            .into_iter()
            .filter(|dir| is_connected(dir))
            .find_map(|dir| read_connector(&dir))
    }
}

impl Default for LinuxDisplayAccessor {
    fn default() -> Self {
        Self::new(DisplaySourceConfig::default())
    }
}

fn is_connected(dir: &Path) -> bool {
    read_optional(&dir.join("status")).as_deref() == Some("connected")
}

/// Parse the first line of a connector's `modes` file ("1920x1080")
fn parse_mode(modes: &str) -> Option<(u32, u32)> {
    let first = modes.lines().next()?.trim();
    let (w, h) = first.split_once('x')?;
    // Interlaced modes carry a trailing "i"
    let h = h.trim_end_matches(|c: char| !c.is_ascii_digit());
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn read_connector(dir: &Path) -> Option<Connector> {
    let edid = fs::read(dir.join("edid")).ok().and_then(|b| Edid::parse(&b));
    let mode = read_optional(&dir.join("modes")).and_then(|m| parse_mode(&m));

    let (width, height) = mode.or_else(|| {
        let t = edid?.timing?;
        Some((t.h_active, t.v_active))
    })?;

    Some(Connector {
        width,
        height,
        edid,
    })
}

impl Accessor for LinuxDisplayAccessor {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn is_available(&self) -> bool {
        self.connector().is_some()
    }
}

impl DisplayAccessor for LinuxDisplayAccessor {
    fn display_info(&self) -> Result<DisplayInfo, BridgeError> {
        let connector = self.connector().ok_or_else(|| {
            BridgeError::failed(
                AccessorKind::Display,
                format!("no connected display under {}", self.config.drm_root),
            )
        })?;
        let (brightness, max_brightness) = self.brightness();

        let (xdpi, ydpi) = connector
            .edid
            .and_then(|e| e.physical_size_mm())
            .map(|(w_mm, h_mm)| {
                (
                    connector.width as f64 / (w_mm / MM_PER_INCH),
                    connector.height as f64 / (h_mm / MM_PER_INCH),
                )
            })
            .unwrap_or((self.config.fallback_dpi, self.config.fallback_dpi));

        let refresh_rate = connector
            .edid
            .and_then(|e| e.timing)
            .and_then(|t| t.refresh_rate())
            .unwrap_or(self.config.fallback_refresh_rate);

        let (density_dpi, density) = density_from_dpi(xdpi, ydpi);

        Ok(DisplayInfo {
            brightness,
            max_brightness,
            width: connector.width,
            height: connector.height,
            density_dpi,
            density,
            screen_size: screen_diagonal(connector.width, connector.height, xdpi, ydpi),
            refresh_rate,
        })
    }
}
