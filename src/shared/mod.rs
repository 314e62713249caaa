//! Shared ambient functionality (configuration, logging re-exports)

pub mod config;
pub mod logger;
