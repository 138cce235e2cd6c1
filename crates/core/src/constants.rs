/// Constants used throughout the reaper codebase
use std::time::Duration;

// Environment variable names
pub const REAPER_THREAD_NAME_VAR: &str = "REAPER_THREAD_NAME";
pub const REAPER_POLL_INTERVAL_VAR: &str = "REAPER_POLL_INTERVAL_MS";
pub const REAPER_LOWER_PRIORITY_VAR: &str = "REAPER_LOWER_PRIORITY";

// Reaper thread defaults
pub const DEFAULT_REAPER_THREAD_NAME: &str = "thread-cleaner-reaper";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

// Nice value applied to the reaper thread (lowest scheduling priority)
pub const REAPER_NICE: i32 = 19;
