//! devreport: a device report dashboard for Linux
//!
//! This library wires the accessor crates into a running dashboard:
//! - Configuration management
//! - Mounting the battery, device, performance and display read paths
//! - The one-shot JSON report
//! - The GTK window that draws the four cards

pub mod config;
pub mod dashboard;
pub mod report;
pub mod ui;

// Re-export commonly used types
pub use config::AppConfig;
pub use dashboard::{Dashboard, DashboardState, Timing};
