//! Integration tests for reclamation-triggered cleanup

use reaper_cleaner::{CleanupTask, Reclaimable, ThreadCleaner};
use reaper_core::{CleanerConfig, Error};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

fn test_cleaner() -> ThreadCleaner {
    let config = CleanerConfig::default()
        .with_reaper_name("integration-reaper")
        .with_poll_interval(Duration::from_millis(25))
        .unwrap();
    ThreadCleaner::new(config).unwrap()
}

fn counting_task(counter: &Arc<AtomicUsize>) -> Option<CleanupTask> {
    let counter = Arc::clone(counter);
    Some(CleanupTask::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }))
}

/// Poll until `condition` holds or five seconds pass
fn wait_until(condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[test]
fn test_cleanup_runs_once_after_reclaim() {
    let cleaner = test_cleaner();
    let counter = Arc::new(AtomicUsize::new(0));
    let baseline = cleaner.live_count();

    let resource = Reclaimable::new(vec![1, 2, 3]);
    cleaner.register(&resource, counting_task(&counter)).unwrap();
    assert_eq!(cleaner.live_count(), baseline + 1);

    drop(resource);

    assert!(wait_until(|| cleaner.live_count() == baseline));
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    // Nothing else is delivered later
    thread::sleep(Duration::from_millis(100));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(cleaner.stats().cleaned, 1);
}

#[test]
fn test_reachable_resource_never_cleaned() {
    let cleaner = test_cleaner();
    let counter = Arc::new(AtomicUsize::new(0));

    let resource = Reclaimable::new("still in use");
    let clone = resource.clone();
    cleaner.register(&resource, counting_task(&counter)).unwrap();
    drop(resource);

    thread::sleep(Duration::from_millis(150));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(cleaner.live_count(), 1);
    assert_eq!(*clone, "still in use");
}

#[test]
fn test_missing_task_is_invalid_argument() {
    let cleaner = test_cleaner();
    let resource = Reclaimable::new(());

    let result = cleaner.register(&resource, None);

    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    assert_eq!(cleaner.live_count(), 0);
}

#[test]
fn test_independent_resources() {
    let cleaner = test_cleaner();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let a = Reclaimable::new("a");
    let b = Reclaimable::new("b");
    cleaner.register(&a, counting_task(&first)).unwrap();
    cleaner.register(&b, counting_task(&second)).unwrap();

    drop(b);
    assert!(wait_until(|| second.load(Ordering::SeqCst) == 1));
    assert_eq!(first.load(Ordering::SeqCst), 0);

    drop(a);
    assert!(wait_until(|| first.load(Ordering::SeqCst) == 1));
    assert!(wait_until(|| cleaner.live_count() == 0));
}

#[test]
fn test_multiple_registrations_same_resource() {
    let cleaner = test_cleaner();
    let counter = Arc::new(AtomicUsize::new(0));

    let resource = Reclaimable::new(());
    for _ in 0..3 {
        cleaner.register(&resource, counting_task(&counter)).unwrap();
    }
    assert_eq!(cleaner.live_count(), 3);

    drop(resource);

    assert!(wait_until(|| cleaner.live_count() == 0));
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[test]
fn test_panicking_task_does_not_stop_reaper() {
    let cleaner = test_cleaner();
    let counter = Arc::new(AtomicUsize::new(0));

    let failing = Reclaimable::new("r2");
    cleaner
        .register(
            &failing,
            Some(CleanupTask::new(|| panic!("simulated cleanup failure"))),
        )
        .unwrap();
    drop(failing);
    assert!(wait_until(|| cleaner.stats().failed == 1));

    let healthy = Reclaimable::new("r3");
    cleaner.register(&healthy, counting_task(&counter)).unwrap();
    drop(healthy);

    assert!(wait_until(|| counter.load(Ordering::SeqCst) == 1));
    assert!(wait_until(|| cleaner.live_count() == 0));
}

#[test]
fn test_worker_thread_exit_triggers_cleanup() {
    let cleaner = Arc::new(test_cleaner());
    let counter = Arc::new(AtomicUsize::new(0));

    let worker = {
        let cleaner = Arc::clone(&cleaner);
        let task = counting_task(&counter);
        let counter = Arc::clone(&counter);
        thread::spawn(move || {
            cleaner.register_current_thread(task).unwrap();
            thread::sleep(Duration::from_millis(50));
            assert_eq!(counter.load(Ordering::SeqCst), 0);
        })
    };

    worker.join().unwrap();

    assert!(wait_until(|| counter.load(Ordering::SeqCst) == 1));
    assert!(wait_until(|| cleaner.live_count() == 0));
}

#[test]
fn test_concurrent_registration() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 50;

    let cleaner = Arc::new(test_cleaner());
    let counter = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cleaner = Arc::clone(&cleaner);
            let counter = Arc::clone(&counter);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    let resource = Reclaimable::new(i);
                    cleaner.register(&resource, counting_task(&counter)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(wait_until(|| cleaner.live_count() == 0));
    assert_eq!(counter.load(Ordering::SeqCst), THREADS * PER_THREAD);
    assert_eq!(cleaner.stats().registered, (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_cleanup_runs_on_reaper_thread() {
    let cleaner = test_cleaner();
    let (tx, rx) = crossbeam::channel::unbounded();

    let resource = Reclaimable::new(());
    cleaner
        .register(
            &resource,
            Some(CleanupTask::new(move || {
                let name = thread::current().name().map(str::to_string);
                let _ = tx.send(name);
            })),
        )
        .unwrap();
    drop(resource);

    let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(name.as_deref(), Some("integration-reaper"));
}

/// Threads of this process whose name starts with `prefix`
#[cfg(target_os = "linux")]
fn threads_named(prefix: &str) -> usize {
    std::fs::read_dir("/proc/self/task")
        .unwrap()
        .filter_map(|task| std::fs::read_to_string(task.ok()?.path().join("comm")).ok())
        .filter(|comm| comm.trim_end().starts_with(prefix))
        .count()
}

#[cfg(target_os = "linux")]
#[test]
fn test_dropped_cleaners_release_reaper_threads() {
    let cleaners: Vec<ThreadCleaner> = (0..5)
        .map(|_| {
            let config = CleanerConfig::default()
                .with_reaper_name("dropped-reaper")
                .with_poll_interval(Duration::from_millis(10))
                .unwrap()
                .with_lower_priority(false);
            ThreadCleaner::new(config).unwrap()
        })
        .collect();
    assert!(wait_until(|| threads_named("dropped-reaper") == 5));

    drop(cleaners);

    assert!(wait_until(|| threads_named("dropped-reaper") == 0));
}
