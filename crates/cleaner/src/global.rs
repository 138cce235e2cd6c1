//! Process-wide cleaner, started on first use and never torn down

use crate::cleaner::{CleanupTask, ThreadCleaner};
use crate::reclaim::Observable;
use once_cell::sync::OnceCell;
use reaper_core::{CleanerConfig, Result};

static GLOBAL_CLEANER: OnceCell<ThreadCleaner> = OnceCell::new();

/// The process-wide cleaner.
///
/// Configured from the environment on first use; an invalid environment
/// falls back to the defaults.
pub fn global() -> Result<&'static ThreadCleaner> {
    GLOBAL_CLEANER.get_or_try_init(|| {
        let config = CleanerConfig::from_env().unwrap_or_else(|e| {
            tracing::warn!("Ignoring reaper environment configuration: {}", e);
            CleanerConfig::default()
        });
        ThreadCleaner::new(config)
    })
}

/// Run `cleanup_task` once `resource` has been reclaimed.
///
/// See [`ThreadCleaner::register`].
pub fn register<R>(resource: &R, cleanup_task: Option<CleanupTask>) -> Result<()>
where
    R: Observable + ?Sized,
{
    global()?.register(resource, cleanup_task)
}

/// Run `cleanup_task` once the calling thread has exited
pub fn register_current_thread(cleanup_task: Option<CleanupTask>) -> Result<()> {
    global()?.register_current_thread(cleanup_task)
}
