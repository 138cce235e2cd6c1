//! Shared-ownership resource observed through its sentinel

use super::sentinel::Sentinel;
use super::{Observable, SentinelRef};
use reaper_core::Result;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A value reclaimed when its last clone is dropped.
///
/// Behaves like an `Arc<T>`; cleanup tasks registered against it run after
/// the value itself has been dropped.
pub struct Reclaimable<T> {
    inner: Arc<ReclaimableInner<T>>,
}

struct ReclaimableInner<T> {
    // Declared before the sentinel so the value drops first
    value: T,
    sentinel: Arc<Sentinel>,
}

impl<T> Reclaimable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(ReclaimableInner {
                value,
                sentinel: Sentinel::new(),
            }),
        }
    }

    /// Number of live clones
    pub fn strong_count(this: &Self) -> usize {
        Arc::strong_count(&this.inner)
    }
}

impl<T> Observable for Reclaimable<T> {
    fn sentinel(&self) -> Result<SentinelRef<'_>> {
        Ok(SentinelRef::new(&self.inner.sentinel))
    }
}

impl<T> Clone for Reclaimable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Deref for Reclaimable<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Reclaimable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reclaimable")
            .field("value", &self.inner.value)
            .field("strong_count", &Arc::strong_count(&self.inner))
            .finish()
    }
}
