//! Timer-driven fetches with stale-result protection
//!
//! A [`Poller`] fetches once on mount and then on every tick. Fetches may
//! overlap when one outlives the interval; each carries the epoch of the tick
//! that started it, and a result is applied only while the poller is still
//! mounted and only if no newer epoch has been applied already. Unmounting
//! stops the timer but does not cancel fetches in flight; their results are
//! dropped on arrival.

use crate::error::BridgeError;
use log::{debug, error, trace, warn};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

struct MountState {
    mounted: bool,
    applied_epoch: u64,
    warned_unavailable: bool,
}

type SharedMountState = Arc<Mutex<MountState>>;

fn lock(state: &Mutex<MountState>) -> MutexGuard<'_, MountState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle to a running refresh routine. Dropping it unmounts.
pub struct Poller {
    name: String,
    state: SharedMountState,
    ticker: Option<JoinHandle<()>>,
}

impl Poller {
    /// Fetch now and then every `interval`, passing successes to `apply`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<T, F, Fut, A>(name: impl Into<String>, interval: Duration, fetch: F, apply: A) -> Self
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, BridgeError>> + Send + 'static,
        A: Fn(T) + Send + Sync + 'static,
    {
        let name = name.into();
        let state = new_state();
        let apply = Arc::new(apply);

        let ticker = {
            let name = name.clone();
            let state = state.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                let mut epoch = 0u64;

                loop {
                    ticker.tick().await;
                    epoch += 1;
                    trace!("{} tick {}", name, epoch);
                    tokio::spawn(run_fetch(
                        name.clone(),
                        epoch,
                        fetch(),
                        state.clone(),
                        apply.clone(),
                    ));
                }
            })
        };

        Self {
            name,
            state,
            ticker: Some(ticker),
        }
    }

    /// Fetch a single time, with the same mount guard as [`Poller::spawn`]
    pub fn once<T, Fut, A>(name: impl Into<String>, fetch: Fut, apply: A) -> Self
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T, BridgeError>> + Send + 'static,
        A: Fn(T) + Send + Sync + 'static,
    {
        let name = name.into();
        let state = new_state();
        tokio::spawn(run_fetch(
            name.clone(),
            1,
            fetch,
            state.clone(),
            Arc::new(apply),
        ));

        Self {
            name,
            state,
            ticker: None,
        }
    }

    /// Stop ticking and discard any result still in flight
    pub fn unmount(&mut self) {
        let was_mounted = std::mem::replace(&mut lock(&self.state).mounted, false);
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        if was_mounted {
            debug!("{} unmounted", self.name);
        }
    }

    pub fn is_mounted(&self) -> bool {
        lock(&self.state).mounted
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn new_state() -> SharedMountState {
    Arc::new(Mutex::new(MountState {
        mounted: true,
        applied_epoch: 0,
        warned_unavailable: false,
    }))
}

async fn run_fetch<T, Fut, A>(
    name: String,
    epoch: u64,
    fetch: Fut,
    state: SharedMountState,
    apply: Arc<A>,
) where
    Fut: Future<Output = Result<T, BridgeError>>,
    A: Fn(T),
{
    let result = fetch.await;

    let mut state = lock(&state);
    if !state.mounted {
        trace!("{} result for epoch {} arrived after unmount", name, epoch);
        return;
    }

    match result {
        Ok(value) => {
            if epoch <= state.applied_epoch {
                debug!(
                    "{} discarding stale result (epoch {} <= {})",
                    name, epoch, state.applied_epoch
                );
                return;
            }
            state.applied_epoch = epoch;
            // Applied under the lock so an unmount cannot interleave
            apply(value);
        }
        Err(e) if e.is_unavailable() => {
            if !state.warned_unavailable {
                state.warned_unavailable = true;
                warn!("{}: {}", name, e);
            }
        }
        Err(e) => error!("Failed to fetch {} data: {}", name, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccessorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Semaphore;

    fn recorder() -> (Arc<Mutex<Vec<usize>>>, impl Fn(usize) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: usize| sink.lock().unwrap().push(v))
    }

    fn seen(values: &Mutex<Vec<usize>>) -> Vec<usize> {
        values.lock().unwrap().clone()
    }

    /// Let every ready task (ticker, fetches) run to its next await point
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    /// Move the paused clock forward and let woken tasks run
    async fn tick(by: Duration) {
        tokio::time::advance(by).await;
        settle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_immediately_and_on_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (values, sink) = recorder();

        let counter = calls.clone();
        let _poller = Poller::spawn(
            "test",
            Duration::from_millis(20),
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok::<_, BridgeError>(n) }
            },
            sink,
        );

        settle().await;
        assert_eq!(seen(&values), vec![1]);

        tick(Duration::from_millis(19)).await;
        assert_eq!(seen(&values), vec![1]);

        tick(Duration::from_millis(1)).await;
        assert_eq!(seen(&values), vec![1, 2]);

        tick(Duration::from_millis(20)).await;
        assert_eq!(seen(&values), vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_during_in_flight_fetch_discards_result() {
        let gate = Arc::new(Semaphore::new(0));
        let started = Arc::new(AtomicUsize::new(0));
        let (values, sink) = recorder();

        let (fetch_gate, fetch_started) = (gate.clone(), started.clone());
        let mut poller = Poller::spawn(
            "performance",
            Duration::from_secs(5),
            move || {
                let gate = fetch_gate.clone();
                let started = fetch_started.clone();
                async move {
                    started.fetch_add(1, Ordering::SeqCst);
                    let _permit = gate.acquire().await.expect("semaphore closed");
                    Ok::<_, BridgeError>(1)
                }
            },
            sink,
        );

        settle().await;
        assert_eq!(started.load(Ordering::SeqCst), 1);

        poller.unmount();
        assert!(!poller.is_mounted());

        gate.add_permits(10);
        tick(Duration::from_secs(15)).await;

        assert!(seen(&values).is_empty());
        // The timer is gone as well
        assert_eq!(started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_discarded() {
        let gate = Arc::new(Semaphore::new(0));
        let calls = Arc::new(AtomicUsize::new(0));
        let (values, sink) = recorder();

        let (fetch_gate, counter) = (gate.clone(), calls.clone());
        let _poller = Poller::spawn(
            "display",
            Duration::from_millis(20),
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                let gate = fetch_gate.clone();
                async move {
                    // The first fetch outlives the next tick
                    if n == 1 {
                        let _permit = gate.acquire().await.expect("semaphore closed");
                    }
                    Ok::<_, BridgeError>(n)
                }
            },
            sink,
        );

        settle().await;
        assert!(seen(&values).is_empty());

        tick(Duration::from_millis(20)).await;
        assert_eq!(seen(&values), vec![2]);

        gate.add_permits(1);
        settle().await;
        assert_eq!(seen(&values), vec![2]);

        tick(Duration::from_millis(20)).await;
        assert_eq!(seen(&values), vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_keeps_previous_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (values, sink) = recorder();

        let counter = calls.clone();
        let _poller = Poller::spawn(
            "memory",
            Duration::from_millis(10),
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n == 2 {
                        Err(BridgeError::failed(AccessorKind::Memory, "boom"))
                    } else {
                        Ok(n)
                    }
                }
            },
            sink,
        );

        settle().await;
        tick(Duration::from_millis(10)).await;
        assert_eq!(seen(&values), vec![1]);

        tick(Duration::from_millis(10)).await;
        assert_eq!(seen(&values), vec![1, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_accessor_warns_once_and_applies_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (values, sink) = recorder();

        let counter = calls.clone();
        let poller = Poller::spawn(
            "display",
            Duration::from_millis(10),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err::<usize, _>(BridgeError::Unavailable(AccessorKind::Display)) }
            },
            sink,
        );

        settle().await;
        assert!(lock(&poller.state).warned_unavailable);

        for _ in 0..3 {
            tick(Duration::from_millis(10)).await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(seen(&values).is_empty());
        assert!(poller.is_mounted());
        let state = lock(&poller.state);
        assert!(state.warned_unavailable);
        assert_eq!(state.applied_epoch, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_once_applies_single_result() {
        let (values, sink) = recorder();
        let poller = Poller::once("device", async { Ok::<_, BridgeError>(7) }, sink);

        settle().await;
        tick(Duration::from_secs(60)).await;
        assert_eq!(seen(&values), vec![7]);
        assert!(poller.is_mounted());
    }
}
