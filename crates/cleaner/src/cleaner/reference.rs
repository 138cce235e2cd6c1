//! Weak observation handle pairing a reclaimed resource with its cleanup task

use super::live_set::LiveSet;
use super::task::CleanupTask;
use crate::reclaim::WeakObservation;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Weak;

/// Process-unique identity of a cleaner reference
pub type ReferenceId = u64;

static NEXT_REFERENCE_ID: AtomicU64 = AtomicU64::new(1);

/// Handle created by every registration.
///
/// Holds the cleanup task and a weak observation of the resource. It never
/// gives the resource back: [`CleanerReference::get`] always returns `None`.
pub struct CleanerReference {
    id: ReferenceId,
    observation: OnceCell<WeakObservation>,
    task: Mutex<Option<CleanupTask>>,
    live_set: Weak<LiveSet>,
}

impl CleanerReference {
    pub(crate) fn new(task: CleanupTask, live_set: Weak<LiveSet>) -> Self {
        Self {
            id: NEXT_REFERENCE_ID.fetch_add(1, Ordering::Relaxed),
            observation: OnceCell::new(),
            task: Mutex::new(Some(task)),
            live_set,
        }
    }

    pub fn id(&self) -> ReferenceId {
        self.id
    }

    /// The observed resource. Always absent.
    pub fn get(&self) -> Option<&(dyn Any + Send + Sync)> {
        None
    }

    /// Whether the task has run or been discarded
    pub fn is_retired(&self) -> bool {
        self.task.lock().is_none()
    }

    pub(crate) fn attach(&self, observation: WeakObservation) {
        // Set once, straight after registration
        let _ = self.observation.set(observation);
    }

    /// Run the task if it has not run yet. Returns whether it ran.
    pub(crate) fn cleanup(&self) -> bool {
        // Not held while the task runs
        let task = self.task.lock().take();
        match task {
            Some(task) => {
                task.run();
                true
            }
            None => false,
        }
    }

    /// Drop out of the live set and stop observing the resource.
    ///
    /// The task is discarded without running. Safe to call repeatedly and
    /// concurrently with the reaper's eviction.
    pub(crate) fn clear(&self) {
        if let Some(live_set) = self.live_set.upgrade() {
            live_set.remove(self.id);
        }
        if let Some(observation) = self.observation.get() {
            observation.clear();
        }
        let discarded = self.task.lock().take();
        drop(discarded);
    }
}

impl fmt::Debug for CleanerReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanerReference")
            .field("id", &self.id)
            .field("retired", &self.is_retired())
            .finish()
    }
}
