//! Memory, storage and CPU snapshots

use serde::{Deserialize, Serialize};

/// RAM totals in bytes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInfo {
    pub total_memory: u64,
    pub available_memory: u64,
    pub low_memory: bool,
}

/// Data partition totals in bytes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub total_storage: u64,
    pub available_storage: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuInfo {
    pub cpu_cores: u32,
}

/// The three performance reads of one tick, combined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInfo {
    pub total_memory: u64,
    pub available_memory: u64,
    pub low_memory: bool,
    pub total_storage: u64,
    pub available_storage: u64,
    pub cpu_cores: u32,
}

impl PerformanceInfo {
    pub fn combine(memory: MemoryInfo, storage: StorageInfo, cpu: CpuInfo) -> Self {
        Self {
            total_memory: memory.total_memory,
            available_memory: memory.available_memory,
            low_memory: memory.low_memory,
            total_storage: storage.total_storage,
            available_storage: storage.available_storage,
            cpu_cores: cpu.cpu_cores,
        }
    }

    pub fn used_memory(&self) -> u64 {
        self.total_memory.saturating_sub(self.available_memory)
    }

    pub fn used_storage(&self) -> u64 {
        self.total_storage.saturating_sub(self.available_storage)
    }

    pub fn memory_usage_percent(&self) -> f64 {
        usage_percent(self.used_memory(), self.total_memory)
    }

    pub fn storage_usage_percent(&self) -> f64 {
        usage_percent(self.used_storage(), self.total_storage)
    }
}

/// `used / total` as a percentage clamped to [0, 100]. A zero total is 0%.
pub fn usage_percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (used as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}
