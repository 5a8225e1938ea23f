//! Mounts the four read paths and keeps their snapshots current
//!
//! Battery is push-driven through a [`BatteryListener`]; performance and
//! display are refreshed by [`Poller`]s; device info is read once. Every path
//! writes into its own [`SnapshotSlot`], which the UI reads when drawing.

use crate::config::AppConfig;
use devreport_core::{
    fetch_device, fetch_display, fetch_performance, Accessors, BatteryInfo, BatteryListener,
    BatteryMonitor, DeviceInfo, DisplayInfo, PerformanceInfo, Poller, SnapshotSlot,
};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

/// Latest snapshot of every card. Unset slots render as loading.
#[derive(Default)]
pub struct DashboardState {
    pub battery: SnapshotSlot<BatteryInfo>,
    pub device: SnapshotSlot<DeviceInfo>,
    pub performance: SnapshotSlot<PerformanceInfo>,
    pub display: SnapshotSlot<DisplayInfo>,
}

impl DashboardState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Changes whenever any slot is written
    pub fn version(&self) -> u64 {
        self.battery.version()
            + self.device.version()
            + self.performance.version()
            + self.display.version()
    }
}

/// Intervals driving the mounted paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub refresh: Duration,
    pub battery_poll: Duration,
}

impl From<&AppConfig> for Timing {
    fn from(config: &AppConfig) -> Self {
        Self {
            refresh: config.refresh_interval(),
            battery_poll: config.battery_poll_interval(),
        }
    }
}

/// The mounted dashboard. Dropping it unmounts every path.
pub struct Dashboard {
    state: Arc<DashboardState>,
    battery: Option<BatteryListener>,
    pollers: Vec<Poller>,
}

impl Dashboard {
    /// Start all four read paths. Must be called from within a tokio runtime.
    pub fn mount(accessors: &Accessors, state: Arc<DashboardState>, timing: Timing) -> Self {
        info!(
            "Mounting dashboard (refresh {:?}, battery poll {:?})",
            timing.refresh, timing.battery_poll
        );

        let monitor = Arc::new(BatteryMonitor::new(
            accessors.battery.clone(),
            timing.battery_poll,
        ));
        let battery = {
            let state = state.clone();
            monitor.listen(move |info| state.battery.store(info))
        };

        let device = {
            let state = state.clone();
            Poller::once(
                "device",
                fetch_device(accessors.device.clone()),
                move |info| state.device.store(info),
            )
        };

        let performance = {
            let state = state.clone();
            let accessor = accessors.performance.clone();
            Poller::spawn(
                "performance",
                timing.refresh,
                move || fetch_performance(accessor.clone()),
                move |info| state.performance.store(info),
            )
        };

        let display = {
            let state = state.clone();
            let accessor = accessors.display.clone();
            Poller::spawn(
                "display",
                timing.refresh,
                move || fetch_display(accessor.clone()),
                move |info| state.display.store(info),
            )
        };

        Self {
            state,
            battery: Some(battery),
            pollers: vec![device, performance, display],
        }
    }

    pub fn state(&self) -> &Arc<DashboardState> {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.battery.is_some()
    }

    /// Stop the battery receiver and every timer; results still in flight
    /// are discarded when they arrive.
    pub fn unmount(&mut self) {
        if self.battery.take().is_none() {
            return;
        }
        for poller in &mut self.pollers {
            poller.unmount();
        }
        debug!("Dashboard unmounted");
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.unmount();
    }
}
