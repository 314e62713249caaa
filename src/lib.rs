//! Library for `ismsview`, the ISO 27001 / NFRM process view generator
//!
//! The binary is a thin shell over [`crate::core::report`]: it builds the built-in
//! [`crate::core::report::DocumentContext`], renders it, and writes one file.

pub mod core;
pub mod shared;

pub use shared::*;
