//! Build file parsing, validation and loading
//!
//! This module handles molt.yml files, per-environment configuration
//! values, and registration of build file targets on an orchestrator.

pub mod loader;
pub mod parse;
pub mod schema;
pub mod types;
pub mod values;

// Re-export main types
pub use loader::*;
pub use parse::*;
pub use schema::*;
pub use types::*;
pub use values::*;
