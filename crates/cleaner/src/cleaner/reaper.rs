//! The reaper: a single background thread that runs delivered cleanup tasks

use super::reference::CleanerReference;
use super::Shared;
use reaper_core::{Error, Result};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, Thread};

/// Start the reaper thread for `shared`.
///
/// The thread is detached. It returns once its cleaner has been dropped and
/// every pending reference has been processed; the process-wide cleaner is
/// never dropped, so its reaper lives as long as the process.
pub(crate) fn spawn(shared: Arc<Shared>) -> Result<Thread> {
    let handle = thread::Builder::new()
        .name(shared.config.reaper_name.clone())
        .spawn(move || run(&shared))?;

    Ok(handle.thread().clone())
}

fn run(shared: &Shared) {
    if shared.config.lower_priority {
        if let Err(e) = lower_priority() {
            tracing::warn!("Failed to lower reaper thread priority: {}", e);
        }
    }

    tracing::info!(
        reaper = %shared.config.reaper_name,
        poll_interval = ?shared.config.poll_interval,
        "reaper started"
    );

    loop {
        // A wait that ends empty-handed is not a shutdown signal by itself
        match shared.queue.remove_timeout(shared.config.poll_interval) {
            Some(reference) => reap(shared, &reference),
            None => {
                shared.metrics.record_spurious_wakeup();
                tracing::trace!("reaper woke without a delivery");
            }
        }

        if shared.is_drained() {
            break;
        }
    }

    tracing::info!(reaper = %shared.config.reaper_name, "reaper exited");
}

/// Run one delivered reference's task, then evict it from the live set
pub(crate) fn reap(shared: &Shared, reference: &Arc<CleanerReference>) {
    let id = reference.id();

    match panic::catch_unwind(AssertUnwindSafe(|| reference.cleanup())) {
        Ok(true) => {
            shared.metrics.record_cleaned();
            tracing::debug!(reference = id, "cleanup task completed");
        }
        Ok(false) => {
            tracing::trace!(reference = id, "reference already retired");
        }
        Err(payload) => {
            shared.metrics.record_failed();
            let error = Error::cleanup_panic(id, payload.as_ref());
            tracing::error!(reference = id, "{}", error);
        }
    }

    // Same removal path as an explicit clear, so a second removal is a no-op
    reference.clear();
}

#[cfg(target_os = "linux")]
fn lower_priority() -> std::io::Result<()> {
    use reaper_core::REAPER_NICE;

    // Linux keeps a nice value per thread; `who == 0` is the calling thread
    let rc = unsafe { libc::setpriority(libc::PRIO_PROCESS, 0, REAPER_NICE) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(target_os = "linux"))]
fn lower_priority() -> std::io::Result<()> {
    // Elsewhere the nice value is per process
    tracing::debug!("thread priority lowering is not supported on this platform");
    Ok(())
}
