//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, help generation,
//! and diagnostic logging setup.

pub mod app;
pub mod logging;

// Re-export main types
pub use app::*;
