//! Device identification from DMI tables, the device tree and the OS release

use crate::sysfs::read_optional;
use devreport_core::{Accessor, AccessorKind, BridgeError, DeviceAccessor, SourceMetadata};
use devreport_types::{DeviceInfo, DeviceSourceConfig};
use std::path::Path;
use sysinfo::System;

const UNKNOWN: &str = "Unknown";

/// Firmware placeholder strings that carry no information
const PLACEHOLDERS: &[&str] = &[
    "To Be Filled By O.E.M.",
    "To be filled by O.E.M.",
    "System Product Name",
    "System manufacturer",
    "Default string",
    "Not Applicable",
];

pub struct LinuxDeviceAccessor {
    metadata: SourceMetadata,
    config: DeviceSourceConfig,
}

impl LinuxDeviceAccessor {
    pub fn new(config: DeviceSourceConfig) -> Self {
        let metadata = SourceMetadata {
            id: "device".to_string(),
            name: "Device".to_string(),
            description: "Device brand, model and operating system version".to_string(),
        };

        Self { metadata, config }
    }

    fn dmi(&self, attribute: &str) -> Option<String> {
        read_optional(&Path::new(&self.config.dmi_root).join(attribute))
            .filter(|value| !PLACEHOLDERS.contains(&value.as_str()))
    }

    fn brand(&self) -> Option<String> {
        self.dmi("sys_vendor").or_else(|| self.dmi("board_vendor"))
    }

    fn model(&self) -> Option<String> {
        self.dmi("product_name")
            .or_else(|| read_optional(Path::new(&self.config.device_tree_model)))
    }
}

impl Default for LinuxDeviceAccessor {
    fn default() -> Self {
        Self::new(DeviceSourceConfig::default())
    }
}

/// Brand from the device-tree model string ("Raspberry Pi 4" -> "Raspberry")
fn brand_from_model(model: &str) -> Option<String> {
    model.split_whitespace().next().map(str::to_string)
}

fn os_version() -> String {
    System::long_os_version()
        .or_else(System::os_version)
        .or_else(|| System::kernel_version().map(|k| format!("Linux {}", k)))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

impl Accessor for LinuxDeviceAccessor {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }
}

impl DeviceAccessor for LinuxDeviceAccessor {
    fn device_info(&self) -> Result<DeviceInfo, BridgeError> {
        let model = self.model();
        let brand = self
            .brand()
            .or_else(|| model.as_deref().and_then(brand_from_model));

        if brand.is_none() && model.is_none() {
            return Err(BridgeError::failed(
                AccessorKind::Device,
                "no DMI or device-tree identification found",
            ));
        }

        Ok(DeviceInfo {
            brand: brand.unwrap_or_else(|| UNKNOWN.to_string()),
            model: model.unwrap_or_else(|| UNKNOWN.to_string()),
            os_version: os_version(),
        })
    }
}
