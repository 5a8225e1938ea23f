//! Accessor configuration types for all four read paths.

pub mod battery;
pub mod device;
pub mod display;
pub mod performance;

pub use battery::BatterySourceConfig;
pub use device::DeviceSourceConfig;
pub use display::DisplaySourceConfig;
pub use performance::PerformanceSourceConfig;
