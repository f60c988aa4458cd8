//! Target resolution and execution
//!
//! This module turns requested target names into an execution plan and
//! runs it, and provides the shell helpers build file targets use.

pub mod command;
pub mod context;
pub mod engine;
pub mod helpers;
pub mod interpolate;
pub mod resolve;

// Re-export main types
pub use command::*;
pub use context::*;
pub use engine::*;
pub use helpers::*;
pub use interpolate::*;
pub use resolve::*;
