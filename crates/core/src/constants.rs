//! Shared constants for the application

use std::time::Duration;

/// Refresh cadence of the performance and display paths
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Default cadence at which the battery receiver re-reads the supply
pub const BATTERY_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// How often the UI checks snapshot versions for redraws
pub const REDRAW_CHECK_INTERVAL: Duration = Duration::from_millis(250);

pub const MM_PER_INCH: f64 = 25.4;
