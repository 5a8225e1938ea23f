//! Wholesale-replaced snapshot storage shared with the UI thread

use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Latest value of one read path.
///
/// Writers replace the whole record; readers get a cheap `Arc` clone. The
/// version increments on every store or clear so the UI can tell when to
/// redraw without comparing records.
pub struct SnapshotSlot<T> {
    value: ArcSwapOption<T>,
    version: AtomicU64,
}

impl<T> SnapshotSlot<T> {
    pub fn new() -> Self {
        Self {
            value: ArcSwapOption::empty(),
            version: AtomicU64::new(0),
        }
    }

    pub fn store(&self, value: T) {
        self.value.store(Some(Arc::new(value)));
        self.version.fetch_add(1, Ordering::Release);
    }

    pub fn clear(&self) {
        self.value.store(None);
        self.version.fetch_add(1, Ordering::Release);
    }

    pub fn load(&self) -> Option<Arc<T>> {
        self.value.load_full()
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

impl<T> Default for SnapshotSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_replaces_and_bumps_version() {
        let slot = SnapshotSlot::new();
        assert!(slot.load().is_none());
        assert_eq!(slot.version(), 0);

        slot.store(1u32);
        slot.store(2u32);
        assert_eq!(*slot.load().unwrap(), 2);
        assert_eq!(slot.version(), 2);

        slot.clear();
        assert!(slot.load().is_none());
        assert_eq!(slot.version(), 3);
    }
}
