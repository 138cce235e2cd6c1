//! Conversion implementations for error types

use super::types::Error;

// Thread spawning is the only io failure the cleaner propagates
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::ReaperUnavailable { source: error }
    }
}
