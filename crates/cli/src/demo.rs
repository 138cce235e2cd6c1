//! Worker-thread demonstration of the thread cleaner

use eyre::{bail, Result};
use reaper_cleaner::{CleanupTask, Reclaimable, ThreadCleaner};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Parameters of a demonstration run
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub workers: usize,
    pub tasks_per_worker: usize,
    /// Every n-th task panics; zero disables failures
    pub fail_every: usize,
    pub timeout: Duration,
}

/// Outcome of a demonstration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub expected: usize,
    pub completed: usize,
    pub failed: usize,
    pub live: usize,
    pub elapsed: Duration,
}

/// Spawn worker threads that register cleanup tasks against themselves and a
/// shared connection pool, let them exit, and wait for the reaper.
pub fn run(cleaner: &'static ThreadCleaner, options: &DemoOptions) -> Result<DemoReport> {
    let started = Instant::now();
    let baseline = cleaner.stats();
    let completed = Arc::new(AtomicUsize::new(0));
    let pool = Reclaimable::new(format!("pool-of-{}", options.workers));

    let mut handles = Vec::with_capacity(options.workers);
    for worker in 0..options.workers {
        let completed = Arc::clone(&completed);
        let pool = pool.clone();
        let options = options.clone();
        let handle = thread::Builder::new()
            .name(format!("demo-worker-{worker}"))
            .spawn(move || -> reaper_core::Result<()> {
                for task in 0..options.tasks_per_worker {
                    let sequence = worker * options.tasks_per_worker + task + 1;
                    let fail = options.fail_every > 0 && sequence % options.fail_every == 0;
                    let completed = Arc::clone(&completed);
                    cleaner.register_current_thread(Some(CleanupTask::new(move || {
                        if fail {
                            panic!("demo task {sequence} failed on purpose");
                        }
                        completed.fetch_add(1, Ordering::SeqCst);
                    })))?;
                }
                tracing::debug!(worker, pool = %*pool, "worker finished");
                Ok(())
            })?;
        handles.push(handle);
    }

    let pool_completed = Arc::clone(&completed);
    cleaner.register(
        &pool,
        Some(CleanupTask::new(move || {
            pool_completed.fetch_add(1, Ordering::SeqCst);
        })),
    )?;
    drop(pool);

    for handle in handles {
        match handle.join() {
            Ok(result) => result?,
            Err(_) => bail!("demo worker panicked"),
        }
    }

    let expected = options.workers * options.tasks_per_worker + 1;
    let deadline = started + options.timeout;
    while cleaner.stats().live > baseline.live && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }

    let stats = cleaner.stats();
    Ok(DemoReport {
        expected,
        completed: completed.load(Ordering::SeqCst),
        failed: usize::try_from(stats.failed - baseline.failed)?,
        live: stats.live,
        elapsed: started.elapsed(),
    })
}
