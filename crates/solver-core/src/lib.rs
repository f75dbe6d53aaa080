//! Shared error type and process configuration.

pub mod config;
pub mod error;

pub use config::SolverConfig;
pub use error::{Error, Result};
