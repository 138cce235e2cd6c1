//! Run-once cleanup tasks for reclaimed resources.
//!
//! A [`ThreadCleaner`] owns a live set of pending references, a reference
//! queue fed by resource sentinels, and one reaper thread draining that
//! queue.
//!
//! ## Key Components
//!
//! - **`reference`**: `CleanerReference`, the handle created per registration.
//! - **`live_set`**: `LiveSet`, which keeps pending references alive.
//! - **`reaper`**: the background thread running delivered tasks.
//! - **`stats`**: counters exposed through `CleanerStats`.

mod live_set;
mod reaper;
mod reference;
mod stats;
mod task;

pub use reference::{CleanerReference, ReferenceId};
pub use stats::CleanerStats;
pub use task::CleanupTask;

use crate::reclaim::{current_thread, Observable, ReferenceQueue};
use live_set::LiveSet;
use reaper_core::{CleanerConfig, Error, Result};
use stats::CleanerMetrics;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::Thread;

/// State shared between registering threads and the reaper
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) live: Arc<LiveSet>,
    pub(crate) queue: ReferenceQueue<Arc<CleanerReference>>,
    pub(crate) metrics: CleanerMetrics,
    pub(crate) config: CleanerConfig,
    /// Set once the owning `ThreadCleaner` is gone
    retired: AtomicBool,
}

impl Shared {
    fn new(config: CleanerConfig) -> Self {
        Self {
            live: Arc::new(LiveSet::new()),
            queue: ReferenceQueue::new(),
            metrics: CleanerMetrics::default(),
            config,
            retired: AtomicBool::new(false),
        }
    }

    fn retire(&self) {
        self.retired.store(true, Ordering::Release);
    }

    /// No owner left and nothing pending: the reaper has no further work
    pub(crate) fn is_drained(&self) -> bool {
        self.retired.load(Ordering::Acquire) && self.live.len() == 0 && self.queue.is_empty()
    }
}

/// Runs a cleanup task once a registered resource has been reclaimed.
///
/// Dropping the cleaner does not cancel pending tasks: its reaper keeps
/// running until every registered resource has been reclaimed and its task
/// has run, then exits.
#[derive(Debug)]
pub struct ThreadCleaner {
    shared: Arc<Shared>,
    reaper: Thread,
}

impl ThreadCleaner {
    /// Create a cleaner and start its reaper thread
    pub fn new(config: CleanerConfig) -> Result<Self> {
        let shared = Arc::new(Shared::new(config));
        let reaper = reaper::spawn(Arc::clone(&shared))?;
        Ok(Self { shared, reaper })
    }

    /// Run `cleanup_task` once `resource` has been reclaimed.
    ///
    /// Registration neither extends the resource's lifetime nor blocks. Each
    /// call creates an independent reference, even for the same resource.
    /// Fails with [`Error::InvalidArgument`] if no task is given.
    pub fn register<R>(&self, resource: &R, cleanup_task: Option<CleanupTask>) -> Result<()>
    where
        R: Observable + ?Sized,
    {
        self.register_reference(resource, cleanup_task).map(drop)
    }

    /// Run `cleanup_task` once the calling thread has exited
    pub fn register_current_thread(&self, cleanup_task: Option<CleanupTask>) -> Result<()> {
        self.register(&current_thread(), cleanup_task)
    }

    /// Number of references whose task has not run yet
    pub fn live_count(&self) -> usize {
        self.shared.live.len()
    }

    pub fn stats(&self) -> CleanerStats {
        self.shared.metrics.snapshot(self.shared.live.len())
    }

    /// The reaper thread
    pub fn reaper_thread(&self) -> &Thread {
        &self.reaper
    }

    fn register_reference<R>(
        &self,
        resource: &R,
        cleanup_task: Option<CleanupTask>,
    ) -> Result<Arc<CleanerReference>>
    where
        R: Observable + ?Sized,
    {
        let task = cleanup_task
            .ok_or_else(|| Error::invalid_argument("cleanup_task", "a cleanup task is required"))?;
        let sentinel = resource.sentinel()?;

        let reference = Arc::new(CleanerReference::new(
            task,
            Arc::downgrade(&self.shared.live),
        ));
        self.shared.live.insert(Arc::clone(&reference));
        let observation = sentinel.observe(Arc::clone(&reference), &self.shared.queue);
        reference.attach(observation);
        self.shared.metrics.record_registered();

        tracing::debug!(
            reference = reference.id(),
            live = self.shared.live.len(),
            "registered cleanup task"
        );

        Ok(reference)
    }
}

impl Drop for ThreadCleaner {
    fn drop(&mut self) {
        self.shared.retire();
        tracing::debug!(
            reaper = %self.shared.config.reaper_name,
            pending = self.shared.live.len(),
            "cleaner dropped, reaper will exit once drained"
        );
    }
}
