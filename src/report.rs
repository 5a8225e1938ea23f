//! One-shot JSON report of every read path, for `--once`

use chrono::{DateTime, Local};
use devreport_core::{
    fetch_device, fetch_display, fetch_performance, run_blocking, Accessors, AccessorKind,
    BatteryInfo, BridgeError, DeviceInfo, DisplayInfo, PerformanceInfo,
};
use log::warn;
use serde::Serialize;

/// A failed path in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportError {
    pub code: &'static str,
    pub message: String,
}

impl From<&BridgeError> for ReportError {
    fn from(err: &BridgeError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub battery: Option<BatteryInfo>,
    pub device: Option<DeviceInfo>,
    pub performance: Option<PerformanceInfo>,
    pub display: Option<DisplayInfo>,
    pub errors: Vec<ReportError>,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn keep<T>(result: Result<T, BridgeError>, errors: &mut Vec<ReportError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{}", e);
            errors.push(ReportError::from(&e));
            None
        }
    }
}

/// Read a single battery event; a malformed one yields no battery entry
async fn read_battery(accessors: &Accessors) -> Result<Option<BatteryInfo>, BridgeError> {
    let source = accessors.battery.clone();
    let event = run_blocking(AccessorKind::Battery, move || source.read_event()).await?;
    Ok(BatteryInfo::from_event(&event))
}

/// Read all four paths concurrently
pub async fn collect(accessors: &Accessors) -> Report {
    let (battery, device, performance, display) = tokio::join!(
        read_battery(accessors),
        fetch_device(accessors.device.clone()),
        fetch_performance(accessors.performance.clone()),
        fetch_display(accessors.display.clone()),
    );

    let mut errors = Vec::new();
    Report {
        generated_at: Local::now(),
        battery: keep(battery, &mut errors).flatten(),
        device: keep(device, &mut errors),
        performance: keep(performance, &mut errors),
        display: keep(display, &mut errors),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devreport_core::{
        Accessor, BatteryEventSource, CpuInfo, DeviceAccessor, DisplayAccessor, MemoryInfo,
        PerformanceAccessor, RawBatteryEvent, SourceMetadata, StorageInfo,
    };
    use devreport_types::BatteryStatus;
    use std::sync::Arc;

    /// Laptop with no display connector and a malformed battery reading
    struct Headless {
        metadata: SourceMetadata,
    }

    impl Accessor for Headless {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }
    }

    impl BatteryEventSource for Headless {
        fn read_event(&self) -> Result<RawBatteryEvent, BridgeError> {
            Ok(RawBatteryEvent {
                level: -1,
                scale: -1,
                status: BatteryStatus::Unknown,
                temperature: -1,
                voltage: None,
            })
        }
    }

    impl DeviceAccessor for Headless {
        fn device_info(&self) -> Result<DeviceInfo, BridgeError> {
            Ok(DeviceInfo {
                brand: "QEMU".to_string(),
                model: "Standard PC".to_string(),
                os_version: "Linux 6.8".to_string(),
            })
        }
    }

    impl PerformanceAccessor for Headless {
        fn memory_info(&self) -> Result<MemoryInfo, BridgeError> {
            Ok(MemoryInfo {
                total_memory: 4096,
                available_memory: 1024,
                low_memory: false,
            })
        }

        fn storage_info(&self) -> Result<StorageInfo, BridgeError> {
            Ok(StorageInfo {
                total_storage: 100,
                available_storage: 40,
            })
        }

        fn cpu_info(&self) -> Result<CpuInfo, BridgeError> {
            Ok(CpuInfo { cpu_cores: 2 })
        }
    }

    impl DisplayAccessor for Headless {
        fn display_info(&self) -> Result<DisplayInfo, BridgeError> {
            Err(BridgeError::Unavailable(AccessorKind::Display))
        }
    }

    fn accessors() -> Accessors {
        let headless = Arc::new(Headless {
            metadata: SourceMetadata {
                id: "headless".to_string(),
                name: "Headless".to_string(),
                description: String::new(),
            },
        });
        Accessors {
            battery: headless.clone(),
            device: headless.clone(),
            performance: headless.clone(),
            display: headless,
        }
    }

    #[tokio::test]
    async fn test_collect_records_failures() {
        let report = collect(&accessors()).await;

        assert!(report.battery.is_none());
        assert_eq!(report.device.as_ref().unwrap().brand, "QEMU");
        assert_eq!(report.performance.as_ref().unwrap().used_memory(), 3072);
        assert!(report.display.is_none());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "DISPLAY_ERROR");
    }

    #[tokio::test]
    async fn test_json_shape() {
        let report = collect(&accessors()).await;
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert!(json["generatedAt"].is_string());
        assert!(json["battery"].is_null());
        assert_eq!(json["device"]["androidVersion"], serde_json::Value::Null);
        assert_eq!(json["device"]["osVersion"], "Linux 6.8");
        assert_eq!(json["errors"][0]["code"], "DISPLAY_ERROR");
    }
}
