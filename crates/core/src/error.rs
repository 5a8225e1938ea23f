//! Accessor error taxonomy

use std::fmt;
use thiserror::Error;

/// Which native read produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Battery,
    Device,
    Memory,
    Storage,
    Cpu,
    Display,
}

impl AccessorKind {
    /// Stable error tag, e.g. `MEMORY_ERROR`
    pub fn code(&self) -> &'static str {
        match self {
            AccessorKind::Battery => "BATTERY_ERROR",
            AccessorKind::Device => "DEVICE_ERROR",
            AccessorKind::Memory => "MEMORY_ERROR",
            AccessorKind::Storage => "STORAGE_ERROR",
            AccessorKind::Cpu => "CPU_ERROR",
            AccessorKind::Display => "DISPLAY_ERROR",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessorKind::Battery => "battery",
            AccessorKind::Device => "device",
            AccessorKind::Memory => "memory",
            AccessorKind::Storage => "storage",
            AccessorKind::Cpu => "cpu",
            AccessorKind::Display => "display",
        }
    }
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a native accessor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// The underlying OS query failed
    #[error("{}: {message}", .kind.code())]
    Failed { kind: AccessorKind, message: String },

    /// Nothing on this system backs the accessor (no battery, no backlight...)
    #[error("{0} accessor is not available on this system")]
    Unavailable(AccessorKind),

    /// The blocking task running the accessor panicked or was cancelled
    #[error("{} task failed: {message}", .kind.code())]
    Task { kind: AccessorKind, message: String },
}

impl BridgeError {
    pub fn failed(kind: AccessorKind, err: impl fmt::Display) -> Self {
        BridgeError::Failed {
            kind,
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> AccessorKind {
        match self {
            BridgeError::Failed { kind, .. } | BridgeError::Task { kind, .. } => *kind,
            BridgeError::Unavailable(kind) => *kind,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, BridgeError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_carries_tag() {
        let err = BridgeError::failed(AccessorKind::Storage, "statvfs failed");
        assert_eq!(err.to_string(), "STORAGE_ERROR: statvfs failed");
        assert_eq!(err.code(), "STORAGE_ERROR");
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_unavailable() {
        let err = BridgeError::Unavailable(AccessorKind::Battery);
        assert_eq!(err.kind(), AccessorKind::Battery);
        assert!(err.is_unavailable());
        assert_eq!(
            err.to_string(),
            "battery accessor is not available on this system"
        );
    }
}
