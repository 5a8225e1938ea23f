//! Battery change receiver and its single subscriber

use crate::accessor::BatteryEventSource;
use crate::error::{AccessorKind, BridgeError};
use devreport_types::{BatteryInfo, RawBatteryEvent};
use log::{debug, info, trace, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

type Listener = Box<dyn Fn(BatteryInfo) + Send + Sync>;

struct ListenerSlot {
    id: u64,
    listener: Listener,
}

type SharedListener = Arc<Mutex<Option<ListenerSlot>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Watches one battery and pushes a [`BatteryInfo`] to the active subscriber
/// whenever the raw state changes.
///
/// At most one receiver task and one subscriber exist at a time. Starting an
/// already-started monitor and stopping a stopped one are both no-ops.
pub struct BatteryMonitor {
    source: Arc<dyn BatteryEventSource>,
    poll_interval: Duration,
    listener: SharedListener,
    next_listener_id: AtomicU64,
    receiver: Mutex<Option<JoinHandle<()>>>,
}

impl BatteryMonitor {
    pub fn new(source: Arc<dyn BatteryEventSource>, poll_interval: Duration) -> Self {
        Self {
            source,
            poll_interval,
            listener: Arc::new(Mutex::new(None)),
            next_listener_id: AtomicU64::new(1),
            receiver: Mutex::new(None),
        }
    }

    /// Install `listener` as the only subscriber, replacing any previous one.
    ///
    /// The listener stays installed until the returned handle is dropped.
    pub fn subscribe<F>(&self, listener: F) -> BatterySubscription
    where
        F: Fn(BatteryInfo) + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        let previous = lock(&self.listener).replace(ListenerSlot {
            id,
            listener: Box::new(listener),
        });
        if previous.is_some() {
            debug!("Battery subscriber replaced");
        }

        BatterySubscription {
            slot: Arc::downgrade(&self.listener),
            id,
        }
    }

    /// Register the receiver. Must be called from within a tokio runtime.
    pub fn start_listening(&self) {
        let mut receiver = lock(&self.receiver);
        if receiver.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        info!(
            "Starting battery receiver for '{}'",
            self.source.metadata().name
        );
        *receiver = Some(tokio::spawn(run_receiver(
            self.source.clone(),
            self.poll_interval,
            self.listener.clone(),
        )));
    }

    pub fn stop_listening(&self) {
        if let Some(handle) = lock(&self.receiver).take() {
            info!("Stopping battery receiver");
            handle.abort();
        }
    }

    pub fn is_listening(&self) -> bool {
        lock(&self.receiver)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Subscribe and start in one step; both are undone when the guard drops
    pub fn listen<F>(self: &Arc<Self>, listener: F) -> BatteryListener
    where
        F: Fn(BatteryInfo) + Send + Sync + 'static,
    {
        let subscription = self.subscribe(listener);
        self.start_listening();
        BatteryListener {
            monitor: self.clone(),
            _subscription: subscription,
        }
    }
}

impl Drop for BatteryMonitor {
    fn drop(&mut self) {
        self.stop_listening();
    }
}

/// Ownership of the subscriber slot. Dropping it removes the listener.
pub struct BatterySubscription {
    slot: Weak<Mutex<Option<ListenerSlot>>>,
    id: u64,
}

impl Drop for BatterySubscription {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.upgrade() {
            let mut slot = lock(&slot);
            // A newer subscriber may have replaced us
            if slot.as_ref().map(|s| s.id) == Some(self.id) {
                *slot = None;
            }
        }
    }
}

/// Active subscription plus running receiver, torn down together on drop
pub struct BatteryListener {
    monitor: Arc<BatteryMonitor>,
    _subscription: BatterySubscription,
}

impl Drop for BatteryListener {
    fn drop(&mut self) {
        self.monitor.stop_listening();
    }
}

async fn run_receiver(
    source: Arc<dyn BatteryEventSource>,
    poll_interval: Duration,
    listener: SharedListener,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_event: Option<RawBatteryEvent> = None;

    loop {
        ticker.tick().await;

        let src = source.clone();
        let event = match tokio::task::spawn_blocking(move || src.read_event()).await {
            Ok(Ok(event)) => event,
            Ok(Err(BridgeError::Unavailable(_))) => {
                warn!("No battery found, battery card will keep loading");
                return;
            }
            Ok(Err(e)) => {
                debug!("Battery read failed: {}", e);
                continue;
            }
            Err(e) => {
                warn!("{} read task failed: {}", AccessorKind::Battery.code(), e);
                continue;
            }
        };

        if last_event.as_ref() == Some(&event) {
            continue;
        }
        last_event = Some(event);

        match BatteryInfo::from_event(&event) {
            Some(info) => {
                trace!("Battery changed: {:?}", info);
                if let Some(slot) = lock(&listener).as_ref() {
                    (slot.listener)(info);
                }
            }
            None => trace!(
                "Dropping malformed battery event (level {}, scale {})",
                event.level,
                event.scale
            ),
        }
    }
}
