//! Tune Player command-line front-end
//!
//! Configuration loading, error types and text rendering shared by the
//! `tune-cli` binary.

pub mod config;
pub mod error;
pub mod output;

pub use config::AppConfig;
pub use error::{CliError, Result};
