//! Reachability tracking for observable resources.
//!
//! A resource is observable when it owns a [`Sentinel`]. Observations
//! attached to the sentinel are delivered, exactly once each, to a
//! [`ReferenceQueue`] when the sentinel drops together with its resource.
//!
//! ## Key Components
//!
//! - **`sentinel`**: `Sentinel` and `WeakObservation`.
//! - **`queue`**: `ReferenceQueue`, the unbounded delivery channel.
//! - **`reclaimable`**: `Reclaimable<T>`, a shared value observed through its
//!   last clone.
//! - **`thread`**: the calling thread, observed through thread-local storage.

pub mod queue;
pub mod reclaimable;
pub mod sentinel;
pub mod thread;

pub use queue::ReferenceQueue;
pub use reclaimable::Reclaimable;
pub use sentinel::{ObservationId, Sentinel, WeakObservation};
pub use thread::{current_thread, CurrentThread};

use reaper_core::Result;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

/// A resource whose reclamation can be observed.
///
/// Implementors must hold the only long-lived strong reference to their
/// sentinel and lend it out through [`SentinelRef`].
pub trait Observable {
    /// Sentinel whose drop marks this resource as reclaimed
    fn sentinel(&self) -> Result<SentinelRef<'_>>;
}

/// Borrow of a resource's sentinel, valid while the resource is borrowed.
///
/// The strong reference inside cannot be taken out, so holding a
/// `SentinelRef` never outlives the borrow of the resource it came from.
pub struct SentinelRef<'a> {
    sentinel: Arc<Sentinel>,
    _resource: PhantomData<&'a ()>,
}

impl<'a> SentinelRef<'a> {
    /// Lend a sentinel owned by the resource
    pub fn new(sentinel: &'a Arc<Sentinel>) -> Self {
        Self::pinned(Arc::clone(sentinel))
    }

    // For sentinels that cannot be borrowed directly, such as thread-locals
    pub(crate) fn pinned(sentinel: Arc<Sentinel>) -> Self {
        Self {
            sentinel,
            _resource: PhantomData,
        }
    }

    pub(crate) fn observe<T>(&self, token: T, queue: &ReferenceQueue<T>) -> WeakObservation
    where
        T: Send + 'static,
    {
        self.sentinel.observe(token, queue)
    }
}

impl Deref for SentinelRef<'_> {
    type Target = Sentinel;

    fn deref(&self) -> &Sentinel {
        &self.sentinel
    }
}
