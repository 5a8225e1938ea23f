//! devreport-sources: Linux accessor implementations for devreport.
//!
//! Every accessor reads kernel attribute files or asks sysinfo, and maps
//! failures onto the tagged [`devreport_core::BridgeError`] taxonomy.

mod battery;
mod device;
mod display;
mod edid;
mod performance;
mod sysfs;

pub use battery::SysfsBatterySource;
pub use device::LinuxDeviceAccessor;
pub use display::LinuxDisplayAccessor;
pub use performance::SysinfoPerformanceAccessor;

use devreport_core::{Accessor, Accessors};
use devreport_types::{
    BatterySourceConfig, DeviceSourceConfig, DisplaySourceConfig, PerformanceSourceConfig,
};
use std::sync::Arc;

/// Per-path configuration for [`linux_accessors`]
#[derive(Debug, Clone, Default)]
pub struct SourceConfigs {
    pub battery: BatterySourceConfig,
    pub device: DeviceSourceConfig,
    pub performance: PerformanceSourceConfig,
    pub display: DisplaySourceConfig,
}

/// Build the Linux accessor set and log which paths have nothing behind them
pub fn linux_accessors(configs: SourceConfigs) -> Accessors {
    let battery = Arc::new(SysfsBatterySource::new(configs.battery));
    let device = Arc::new(LinuxDeviceAccessor::new(configs.device));
    let performance = Arc::new(SysinfoPerformanceAccessor::new(configs.performance));
    let display = Arc::new(LinuxDisplayAccessor::new(configs.display));

    let all: [&dyn Accessor; 4] = [
        battery.as_ref(),
        device.as_ref(),
        performance.as_ref(),
        display.as_ref(),
    ];
    for accessor in all {
        if accessor.is_available() {
            log::info!("{} accessor ready", accessor.metadata().name);
        } else {
            log::warn!(
                "{} accessor is not available on this system",
                accessor.metadata().name
            );
        }
    }

    Accessors {
        battery,
        device,
        performance,
        display,
    }
}
