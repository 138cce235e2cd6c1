//! Core error type definitions

/// Result type alias for reaper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for reaper operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller supplied a missing or unusable argument
    InvalidArgument { argument: String, message: String },

    /// A cleanup action failed while running on the reaper thread
    CleanupActionFailure { reference: u64, message: String },

    /// The reaper thread could not be started
    ReaperUnavailable {
        #[source]
        source: std::io::Error,
    },

    /// The current thread is already tearing down its thread-local storage
    ThreadExiting,

    /// Configuration errors
    Configuration { message: String },
}
