//! Core errors, constants, and configuration for the `reaper` workspace.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias
//!   shared by the cleaner and the CLI.
//! - **`config`**: `CleanerConfig`, the knobs of the background reaper, with
//!   defaults and environment overrides.
//! - **`constants`**: Environment variable names and default values.

pub mod config;
pub mod constants;
pub mod errors;

pub use self::{
    config::CleanerConfig,
    constants::*,
    errors::{Error, Result},
};
