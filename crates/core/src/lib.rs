//! devreport-core: Accessor traits, monitors and pollers for devreport.
//!
//! This crate contains the accessor traits each read path talks through,
//! the error taxonomy, the battery receiver, the epoch-guarded poller, and
//! the snapshot slots shared with the UI.

mod accessor;
mod battery_monitor;
pub mod constants;
mod error;
mod fetch;
mod poller;
mod snapshot;

pub use accessor::{
    Accessor, Accessors, BatteryEventSource, DeviceAccessor, DisplayAccessor,
    PerformanceAccessor, SourceMetadata,
};
pub use battery_monitor::{BatteryListener, BatteryMonitor, BatterySubscription};
pub use constants::{BATTERY_POLL_INTERVAL, REDRAW_CHECK_INTERVAL, REFRESH_INTERVAL};
pub use error::{AccessorKind, BridgeError};
pub use fetch::{fetch_device, fetch_display, fetch_performance, run_blocking};
pub use poller::Poller;
pub use snapshot::SnapshotSlot;

// Re-export record types used in trait signatures for convenience
pub use devreport_types::{
    BatteryInfo, CpuInfo, DeviceInfo, DisplayInfo, MemoryInfo, PerformanceInfo,
    RawBatteryEvent, StorageInfo,
};
