//! Native accessor traits
//!
//! Each read path talks to the platform through one of these traits. The
//! methods are synchronous and may block on filesystem reads; callers run
//! them on tokio's blocking pool.

use crate::error::BridgeError;
use devreport_types::{
    CpuInfo, DeviceInfo, DisplayInfo, MemoryInfo, RawBatteryEvent, StorageInfo,
};
use std::sync::Arc;

/// Metadata about an accessor
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Unique identifier for this accessor
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of what this accessor reads
    pub description: String,
}

/// Common behaviour of every accessor
pub trait Accessor: Send + Sync {
    /// Get metadata about this accessor
    fn metadata(&self) -> &SourceMetadata;

    /// Check if this accessor is backed by anything on the current system
    fn is_available(&self) -> bool {
        true
    }
}

/// Source of raw battery-change events
pub trait BatteryEventSource: Accessor {
    /// Read the current battery state as a raw event
    fn read_event(&self) -> Result<RawBatteryEvent, BridgeError>;
}

pub trait DeviceAccessor: Accessor {
    fn device_info(&self) -> Result<DeviceInfo, BridgeError>;
}

/// Memory, storage and CPU reads. Each fails independently.
pub trait PerformanceAccessor: Accessor {
    fn memory_info(&self) -> Result<MemoryInfo, BridgeError>;
    fn storage_info(&self) -> Result<StorageInfo, BridgeError>;
    fn cpu_info(&self) -> Result<CpuInfo, BridgeError>;
}

pub trait DisplayAccessor: Accessor {
    fn display_info(&self) -> Result<DisplayInfo, BridgeError>;
}

/// The full set of accessors one dashboard mounts
#[derive(Clone)]
pub struct Accessors {
    pub battery: Arc<dyn BatteryEventSource>,
    pub device: Arc<dyn DeviceAccessor>,
    pub performance: Arc<dyn PerformanceAccessor>,
    pub display: Arc<dyn DisplayAccessor>,
}
