//! Memory, storage and CPU reads through sysinfo

use devreport_core::{
    Accessor, AccessorKind, BridgeError, PerformanceAccessor, SourceMetadata,
};
use devreport_types::{CpuInfo, MemoryInfo, PerformanceSourceConfig, StorageInfo};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Mutex;
use sysinfo::{CpuRefreshKind, Disks, RefreshKind, System};

/// Shared sysinfo::System instance for memory reads.
static SHARED_SYSTEM: Lazy<Mutex<System>> = Lazy::new(|| {
    log::info!("Creating shared performance sysinfo::System instance");
    Mutex::new(System::new())
});

/// One mounted filesystem as seen by the storage read
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MountedDisk {
    pub mount_point: String,
    pub total: u64,
    pub available: u64,
}

pub struct SysinfoPerformanceAccessor {
    metadata: SourceMetadata,
    config: PerformanceSourceConfig,
}

impl SysinfoPerformanceAccessor {
    pub fn new(config: PerformanceSourceConfig) -> Self {
        let metadata = SourceMetadata {
            id: "performance".to_string(),
            name: "Performance".to_string(),
            description: "RAM and storage usage, CPU core count".to_string(),
        };

        Self { metadata, config }
    }

    pub fn get_config(&self) -> &PerformanceSourceConfig {
        &self.config
    }
}

impl Default for SysinfoPerformanceAccessor {
    fn default() -> Self {
        Self::new(PerformanceSourceConfig::default())
    }
}

pub(crate) fn is_low_memory(total: u64, available: u64, threshold_percent: f64) -> bool {
    total > 0 && (available as f64 / total as f64 * 100.0) < threshold_percent
}

/// The disk whose mount point is the longest path prefix of `path`
pub(crate) fn select_disk<'a>(disks: &'a [MountedDisk], path: &str) -> Option<&'a MountedDisk> {
    let target = Path::new(path);
    disks
        .iter()
        .filter(|disk| target.starts_with(&disk.mount_point))
        .max_by_key(|disk| Path::new(&disk.mount_point).components().count())
}

impl Accessor for SysinfoPerformanceAccessor {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }
}

impl PerformanceAccessor for SysinfoPerformanceAccessor {
    fn memory_info(&self) -> Result<MemoryInfo, BridgeError> {
        let mut system = SHARED_SYSTEM
            .lock()
            .map_err(|e| BridgeError::failed(AccessorKind::Memory, e))?;
        system.refresh_memory();

        let total_memory = system.total_memory();
        let available_memory = system.available_memory();
        drop(system);

        if total_memory == 0 {
            return Err(BridgeError::failed(
                AccessorKind::Memory,
                "kernel reported zero total memory",
            ));
        }

        Ok(MemoryInfo {
            total_memory,
            available_memory,
            low_memory: is_low_memory(
                total_memory,
                available_memory,
                self.config.low_memory_percent,
            ),
        })
    }

    fn storage_info(&self) -> Result<StorageInfo, BridgeError> {
        let disks: Vec<MountedDisk> = Disks::new_with_refreshed_list()
            .iter()
            .map(|disk| MountedDisk {
                mount_point: disk.mount_point().to_string_lossy().to_string(),
                total: disk.total_space(),
                available: disk.available_space(),
            })
            .collect();

        let disk = select_disk(&disks, &self.config.storage_path).ok_or_else(|| {
            BridgeError::failed(
                AccessorKind::Storage,
                format!("no filesystem mounted for {}", self.config.storage_path),
            )
        })?;

        Ok(StorageInfo {
            total_storage: disk.total,
            available_storage: disk.available,
        })
    }

    fn cpu_info(&self) -> Result<CpuInfo, BridgeError> {
        let system =
            System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::everything()));
        let cores = system.cpus().len();
        if cores == 0 {
            return Err(BridgeError::failed(AccessorKind::Cpu, "no CPUs reported"));
        }

        Ok(CpuInfo {
            cpu_cores: cores as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(mount_point: &str, total: u64) -> MountedDisk {
        MountedDisk {
            mount_point: mount_point.to_string(),
            total,
            available: total / 2,
        }
    }

    #[test]
    fn test_select_longest_mount_prefix() {
        let disks = vec![disk("/", 100), disk("/home", 200), disk("/home/user/data", 300)];

        assert_eq!(select_disk(&disks, "/").unwrap().total, 100);
        assert_eq!(select_disk(&disks, "/home/user").unwrap().total, 200);
        assert_eq!(select_disk(&disks, "/home/user/data/x").unwrap().total, 300);
        assert_eq!(select_disk(&disks, "/var").unwrap().total, 100);
    }

    #[test]
    fn test_select_respects_path_components() {
        // "/homework" is not under "/home"
        let disks = vec![disk("/", 100), disk("/home", 200)];
        assert_eq!(select_disk(&disks, "/homework").unwrap().total, 100);
    }

    #[test]
    fn test_select_none() {
        assert!(select_disk(&[], "/").is_none());
    }

    #[test]
    fn test_low_memory_threshold() {
        assert!(is_low_memory(1000, 50, 10.0));
        assert!(!is_low_memory(1000, 100, 10.0));
        assert!(!is_low_memory(0, 0, 10.0));
    }

    #[test]
    fn test_live_reads() {
        let accessor = SysinfoPerformanceAccessor::default();
        let memory = accessor.memory_info().unwrap();
        assert!(memory.total_memory > 0);
        assert!(accessor.cpu_info().unwrap().cpu_cores >= 1);
    }
}
