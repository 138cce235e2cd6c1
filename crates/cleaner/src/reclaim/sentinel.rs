//! Reachability sentinel and the weak observations attached to it

use super::queue::ReferenceQueue;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

/// Identifier of an observation, unique per sentinel
pub type ObservationId = u64;

type Delivery = Box<dyn FnOnce() + Send>;

/// Marker owned by an observable resource.
///
/// The resource must hold the only strong reference to its sentinel, so the
/// sentinel drops exactly when the resource is reclaimed. On drop, every
/// observation still attached is delivered to its queue once.
pub struct Sentinel {
    observers: Mutex<Observers>,
}

#[derive(Default)]
struct Observers {
    next_id: ObservationId,
    entries: Vec<(ObservationId, Delivery)>,
}

impl Sentinel {
    /// Create a sentinel for a new resource
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            observers: Mutex::new(Observers::default()),
        })
    }

    /// Attach `token`, to be enqueued on `queue` once this sentinel drops.
    ///
    /// The returned observation does not keep the sentinel alive.
    pub fn observe<T>(self: &Arc<Self>, token: T, queue: &ReferenceQueue<T>) -> WeakObservation
    where
        T: Send + 'static,
    {
        let queue = queue.clone();
        let mut observers = self.observers.lock();
        let id = observers.next_id;
        observers.next_id += 1;
        observers
            .entries
            .push((id, Box::new(move || queue.enqueue(token))));

        WeakObservation {
            sentinel: Arc::downgrade(self),
            id,
        }
    }

    /// Number of observations waiting for this sentinel to drop
    pub fn observer_count(&self) -> usize {
        self.observers.lock().entries.len()
    }

    fn detach(&self, id: ObservationId) -> bool {
        let mut observers = self.observers.lock();
        match observers.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                // Dropping the delivery drops the token without enqueueing it
                drop(observers.entries.swap_remove(index));
                true
            }
            None => false,
        }
    }
}

impl Drop for Sentinel {
    fn drop(&mut self) {
        let entries = std::mem::take(&mut self.observers.get_mut().entries);
        for (_, deliver) in entries {
            deliver();
        }
    }
}

impl fmt::Debug for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sentinel")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Non-extending observation of a sentinel
#[derive(Debug, Clone)]
pub struct WeakObservation {
    sentinel: Weak<Sentinel>,
    id: ObservationId,
}

impl WeakObservation {
    pub fn id(&self) -> ObservationId {
        self.id
    }

    /// Whether the observed resource has been reclaimed
    pub fn is_reclaimed(&self) -> bool {
        self.sentinel.strong_count() == 0
    }

    /// Detach from the sentinel so the token is never delivered.
    ///
    /// Returns `false` if the observation was already detached or delivered.
    pub fn clear(&self) -> bool {
        match self.sentinel.upgrade() {
            Some(sentinel) => sentinel.detach(self.id),
            None => false,
        }
    }
}
