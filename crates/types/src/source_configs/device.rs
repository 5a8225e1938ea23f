//! Device info source configuration types.

use serde::{Deserialize, Serialize};

fn default_dmi_root() -> String {
    "/sys/class/dmi/id".to_string()
}

fn default_device_tree_model() -> String {
    "/proc/device-tree/model".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSourceConfig {
    #[serde(default = "default_dmi_root")]
    pub dmi_root: String,
    /// Model string on boards without DMI tables
    #[serde(default = "default_device_tree_model")]
    pub device_tree_model: String,
}

impl Default for DeviceSourceConfig {
    fn default() -> Self {
        Self {
            dmi_root: default_dmi_root(),
            device_tree_model: default_device_tree_model(),
        }
    }
}
