//! Run a cleanup task exactly once after a resource has been reclaimed.
//!
//! Resources are observed without being kept alive. When the last owner of a
//! [`Reclaimable`] value drops it, or when a registered thread exits, every
//! cleanup task registered against it is handed to a single low-priority
//! reaper thread, which runs the tasks one at a time. A panicking task is
//! logged and does not affect the others.
//!
//! ```rust,no_run
//! use reaper_cleaner::{register, CleanupTask, Reclaimable};
//!
//! # fn main() -> reaper_core::Result<()> {
//! let connection = Reclaimable::new("worker-connection");
//! register(&connection, Some(CleanupTask::new(|| println!("released"))))?;
//! drop(connection);
//! # Ok(())
//! # }
//! ```

pub mod cleaner;
pub mod global;
pub mod reclaim;

pub use cleaner::{CleanerReference, CleanerStats, CleanupTask, ReferenceId, ThreadCleaner};
pub use global::{global, register, register_current_thread};
pub use reclaim::{
    current_thread, CurrentThread, Observable, Reclaimable, ReferenceQueue, Sentinel, SentinelRef,
};
