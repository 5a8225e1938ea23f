//! Battery event source backed by the kernel power-supply class

use crate::sysfs::{parse_uevent, read_optional, read_trimmed, sorted_entries};
use anyhow::Result;
use devreport_core::{
    Accessor, AccessorKind, BatteryEventSource, BridgeError, SourceMetadata,
};
use devreport_types::{BatteryStatus, BatterySourceConfig, RawBatteryEvent};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const MICRO: f64 = 1_000_000.0;

/// Reads `/sys/class/power_supply/<BAT>/uevent` and turns it into a raw
/// battery-change event.
pub struct SysfsBatterySource {
    metadata: SourceMetadata,
    config: BatterySourceConfig,
}

impl SysfsBatterySource {
    pub fn new(config: BatterySourceConfig) -> Self {
        let metadata = SourceMetadata {
            id: "battery".to_string(),
            name: "Battery".to_string(),
            description: "Battery level, charge state, temperature and voltage".to_string(),
        };

        Self { metadata, config }
    }

    pub fn get_config(&self) -> &BatterySourceConfig {
        &self.config
    }

    /// Directory of the battery to watch, if there is one
    fn find_supply(&self) -> Option<PathBuf> {
        let root = Path::new(&self.config.power_supply_root);

        if let Some(name) = &self.config.supply_name {
            let dir = root.join(name);
            return dir.is_dir().then_some(dir);
        }

        sorted_entries(root).ok()?.into_iter().find(|dir| is_battery(dir))
    }
}

impl Default for SysfsBatterySource {
    fn default() -> Self {
        Self::new(BatterySourceConfig::default())
    }
}

fn is_battery(dir: &Path) -> bool {
    match read_optional(&dir.join("type")) {
        Some(kind) => kind == "Battery",
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().starts_with("BAT"))
            .unwrap_or(false),
    }
}

fn get_i64(fields: &HashMap<String, String>, key: &str) -> Option<i64> {
    fields.get(key)?.parse().ok()
}

/// Build a raw event from parsed uevent fields.
///
/// The charge ratio prefers energy counters, then charge counters, then the
/// kernel's own capacity percentage. A pair whose full counter is zero is
/// skipped. Missing everything yields a malformed event (`level == -1`),
/// which the monitor drops.
fn event_from_fields(fields: &HashMap<String, String>) -> RawBatteryEvent {
    let ratio = [("ENERGY_NOW", "ENERGY_FULL"), ("CHARGE_NOW", "CHARGE_FULL")]
        .iter()
        .find_map(|(now, full)| {
            let full = get_i64(fields, full).filter(|&full| full > 0)?;
            Some((get_i64(fields, now)?, full))
        })
        .or_else(|| get_i64(fields, "CAPACITY").map(|c| (c, 100)));
    let (level, scale) = ratio.unwrap_or((-1, -1));

    RawBatteryEvent {
        level,
        scale,
        status: fields
            .get("STATUS")
            .map(|s| BatteryStatus::from_sysfs(s))
            .unwrap_or_default(),
        temperature: get_i64(fields, "TEMP")
            .and_then(|t| i32::try_from(t).ok())
            .unwrap_or(-1),
        voltage: get_i64(fields, "VOLTAGE_NOW").map(|uv| uv as f64 / MICRO),
    }
}

fn read_supply(dir: &Path) -> Result<RawBatteryEvent> {
    let text = read_trimmed(&dir.join("uevent"))?;
    Ok(event_from_fields(&parse_uevent(&text)))
}

impl Accessor for SysfsBatterySource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn is_available(&self) -> bool {
        self.find_supply().is_some()
    }
}

impl BatteryEventSource for SysfsBatterySource {
    fn read_event(&self) -> Result<RawBatteryEvent, BridgeError> {
        let dir = self
            .find_supply()
            .ok_or(BridgeError::Unavailable(AccessorKind::Battery))?;
        read_supply(&dir).map_err(|e| BridgeError::failed(AccessorKind::Battery, format!("{:#}", e)))
    }
}
