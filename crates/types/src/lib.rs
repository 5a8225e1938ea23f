//! devreport-types: Snapshot records and derived formatting for devreport.
//!
//! This crate contains the flat records produced by each read path, the
//! accessor configuration types, and the pure arithmetic and text
//! formatting the cards rely on. Nothing here touches the OS or GTK.

pub mod battery;
pub mod color;
pub mod device;
pub mod display;
pub mod format;
pub mod performance;
pub mod source_configs;

// Re-export commonly used types at the crate root for convenience
pub use battery::{BatteryInfo, BatteryStatus, RawBatteryEvent};
pub use color::{palette, Color};
pub use device::DeviceInfo;
pub use display::{density_from_dpi, screen_diagonal, DisplayInfo, BRIGHTNESS_UNSET};
pub use performance::{usage_percent, CpuInfo, MemoryInfo, PerformanceInfo, StorageInfo};
pub use source_configs::{
    BatterySourceConfig, DeviceSourceConfig, DisplaySourceConfig, PerformanceSourceConfig,
};
