//! Property tests: every registered task runs exactly once

use proptest::prelude::*;
use reaper_cleaner::{CleanupTask, Reclaimable, ThreadCleaner};
use reaper_core::CleanerConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn cleaner() -> &'static ThreadCleaner {
    static CLEANER: once_cell::sync::Lazy<ThreadCleaner> = once_cell::sync::Lazy::new(|| {
        let config = CleanerConfig::default()
            .with_reaper_name("proptest-reaper")
            .with_poll_interval(Duration::from_millis(10))
            .unwrap();
        ThreadCleaner::new(config).unwrap()
    });
    &CLEANER
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_task_runs_exactly_once(registrations in prop::collection::vec(1usize..5, 1..20)) {
        let cleaner = cleaner();
        let baseline = cleaner.live_count();
        let counters: Vec<Vec<Arc<AtomicUsize>>> = registrations
            .iter()
            .map(|&n| (0..n).map(|_| Arc::new(AtomicUsize::new(0))).collect())
            .collect();

        let resources: Vec<Reclaimable<usize>> =
            (0..registrations.len()).map(Reclaimable::new).collect();
        for (resource, resource_counters) in resources.iter().zip(&counters) {
            for counter in resource_counters {
                let counter = Arc::clone(counter);
                cleaner
                    .register(resource, Some(CleanupTask::new(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    })))
                    .unwrap();
            }
        }

        drop(resources);

        let all_ran = || counters.iter().flatten().all(|c| c.load(Ordering::SeqCst) >= 1);
        let deadline = Instant::now() + Duration::from_secs(5);
        while !all_ran() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }

        // Give a duplicate delivery the chance to show up
        thread::sleep(Duration::from_millis(20));
        for counter in counters.iter().flatten() {
            prop_assert_eq!(counter.load(Ordering::SeqCst), 1);
        }

        // Every reference is evicted once its task has run
        let deadline = Instant::now() + Duration::from_secs(5);
        while cleaner.live_count() > baseline && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
        prop_assert_eq!(cleaner.live_count(), baseline);
    }
}
