//! Performance source configuration types.

use serde::{Deserialize, Serialize};

fn default_storage_path() -> String {
    "/".to_string()
}

fn default_low_memory_percent() -> f64 {
    10.0
}

/// Memory, storage and CPU source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSourceConfig {
    /// Path whose filesystem counts as "storage"
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Available memory below this share of total flags `low_memory`
    #[serde(default = "default_low_memory_percent")]
    pub low_memory_percent: f64,
}

impl Default for PerformanceSourceConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            low_memory_percent: default_low_memory_percent(),
        }
    }
}
