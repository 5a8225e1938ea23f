//! Static device identification

use serde::{Deserialize, Serialize};

/// Brand, model and OS release, read once per session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub brand: String,
    pub model: String,
    #[serde(alias = "androidVersion")]
    pub os_version: String,
}
