//! Counters describing cleaner activity

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a cleaner's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanerStats {
    /// Successful registrations
    pub registered: u64,
    /// Tasks that ran to completion
    pub cleaned: u64,
    /// Tasks that panicked
    pub failed: u64,
    /// Reaper waits that ended without a delivery
    pub spurious_wakeups: u64,
    /// References still waiting in the live set
    pub live: usize,
}

/// Atomic counters updated by registering threads and the reaper
#[derive(Debug, Default)]
pub(crate) struct CleanerMetrics {
    registered: AtomicU64,
    cleaned: AtomicU64,
    failed: AtomicU64,
    spurious_wakeups: AtomicU64,
}

impl CleanerMetrics {
    pub(crate) fn record_registered(&self) {
        self.registered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cleaned(&self) {
        self.cleaned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_spurious_wakeup(&self) {
        self.spurious_wakeups.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, live: usize) -> CleanerStats {
        CleanerStats {
            registered: self.registered.load(Ordering::Relaxed),
            cleaned: self.cleaned.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            spurious_wakeups: self.spurious_wakeups.load(Ordering::Relaxed),
            live,
        }
    }
}
