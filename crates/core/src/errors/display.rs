//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument { argument, message } => {
                write!(f, "invalid argument '{argument}': {message}")
            }
            Error::CleanupActionFailure { reference, message } => {
                write!(f, "cleanup action for reference #{reference} failed: {message}")
            }
            Error::ReaperUnavailable { source } => {
                write!(f, "failed to start reaper thread: {source}")
            }
            Error::ThreadExiting => {
                write!(f, "current thread is exiting and cannot be observed")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
        }
    }
}
