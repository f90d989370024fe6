//! Station CLI Library
//!
//! Command implementations behind the `station` binary, exposed for testing.

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;

pub use app::App;
pub use crate::config::StationConfig;
pub use error::{CliError, Result};
