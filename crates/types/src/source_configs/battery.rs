//! Battery source configuration types.

use serde::{Deserialize, Serialize};

fn default_power_supply_root() -> String {
    "/sys/class/power_supply".to_string()
}

fn default_poll_interval() -> u64 {
    1000
}

/// Battery source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterySourceConfig {
    #[serde(default = "default_power_supply_root")]
    pub power_supply_root: String,
    /// Specific supply name (e.g. "BAT1"); first battery found when unset
    #[serde(default)]
    pub supply_name: Option<String>,
    /// How often the receiver re-reads the supply looking for changes
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for BatterySourceConfig {
    fn default() -> Self {
        Self {
            power_supply_root: default_power_supply_root(),
            supply_name: None,
            poll_interval_ms: default_poll_interval(),
        }
    }
}
