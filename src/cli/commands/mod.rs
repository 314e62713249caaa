//! CLI command handlers for `ismsview`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod check;
pub mod config;
pub mod generate;
