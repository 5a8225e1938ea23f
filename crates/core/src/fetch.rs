//! Asynchronous wrappers over the blocking accessors

use crate::accessor::{DeviceAccessor, DisplayAccessor, PerformanceAccessor};
use crate::error::{AccessorKind, BridgeError};
use devreport_types::{DeviceInfo, DisplayInfo, PerformanceInfo};
use std::sync::Arc;

/// Run a blocking accessor call on tokio's blocking pool
pub async fn run_blocking<T, F>(kind: AccessorKind, call: F) -> Result<T, BridgeError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, BridgeError> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| BridgeError::Task {
            kind,
            message: e.to_string(),
        })?
}

/// Issue the memory, storage and CPU reads together.
///
/// Any single failure fails the whole fetch so the caller keeps its
/// previous snapshot.
pub async fn fetch_performance(
    accessor: Arc<dyn PerformanceAccessor>,
) -> Result<PerformanceInfo, BridgeError> {
    let memory = {
        let accessor = accessor.clone();
        run_blocking(AccessorKind::Memory, move || accessor.memory_info())
    };
    let storage = {
        let accessor = accessor.clone();
        run_blocking(AccessorKind::Storage, move || accessor.storage_info())
    };
    let cpu = run_blocking(AccessorKind::Cpu, move || accessor.cpu_info());

    let (memory, storage, cpu) = tokio::try_join!(memory, storage, cpu)?;
    Ok(PerformanceInfo::combine(memory, storage, cpu))
}

pub async fn fetch_display(accessor: Arc<dyn DisplayAccessor>) -> Result<DisplayInfo, BridgeError> {
    run_blocking(AccessorKind::Display, move || accessor.display_info()).await
}

pub async fn fetch_device(accessor: Arc<dyn DeviceAccessor>) -> Result<DeviceInfo, BridgeError> {
    run_blocking(AccessorKind::Device, move || accessor.device_info()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{Accessor, SourceMetadata};
    use devreport_types::{CpuInfo, MemoryInfo, StorageInfo};

    struct FixedPerformance {
        metadata: SourceMetadata,
        fail_storage: bool,
    }

    impl FixedPerformance {
        fn new(fail_storage: bool) -> Arc<Self> {
            Arc::new(Self {
                metadata: SourceMetadata {
                    id: "fixed".to_string(),
                    name: "Fixed".to_string(),
                    description: String::new(),
                },
                fail_storage,
            })
        }
    }

    impl Accessor for FixedPerformance {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }
    }

    impl PerformanceAccessor for FixedPerformance {
        fn memory_info(&self) -> Result<MemoryInfo, BridgeError> {
            Ok(MemoryInfo {
                total_memory: 8_000_000_000,
                available_memory: 2_000_000_000,
                low_memory: false,
            })
        }

        fn storage_info(&self) -> Result<StorageInfo, BridgeError> {
            if self.fail_storage {
                return Err(BridgeError::failed(AccessorKind::Storage, "no data partition"));
            }
            Ok(StorageInfo {
                total_storage: 100,
                available_storage: 40,
            })
        }

        fn cpu_info(&self) -> Result<CpuInfo, BridgeError> {
            Ok(CpuInfo { cpu_cores: 8 })
        }
    }

    #[tokio::test]
    async fn test_fetch_performance_combines() {
        let info = fetch_performance(FixedPerformance::new(false)).await.unwrap();
        assert_eq!(info.cpu_cores, 8);
        assert_eq!(info.memory_usage_percent(), 75.0);
        assert_eq!(info.storage_usage_percent(), 60.0);
    }

    #[tokio::test]
    async fn test_partial_failure_fails_whole_fetch() {
        let err = fetch_performance(FixedPerformance::new(true)).await.unwrap_err();
        assert_eq!(err.code(), "STORAGE_ERROR");
    }
}
