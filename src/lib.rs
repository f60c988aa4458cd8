//! Molt - a lightweight target orchestrator
//!
//! Targets are named actions with dependencies. Requested targets are
//! resolved into a plan where every dependency runs once and before its
//! dependents, then executed sequentially; a failure skips whatever is left.
//! Environment arguments are resolved from `--arg` overrides, the process
//! environment, envargs files and declared defaults, in that order.
//!
//! Targets can be declared in code through [`Orchestrator`] or in a
//! `molt.yml` build file run by the `molt` binary.

// Public modules
pub mod cli;
pub mod config;
pub mod envarg;
pub mod error;
pub mod orchestrator;
pub mod runner;
pub mod target;
pub mod ui;

// Re-export commonly used types
pub use envarg::{ArgSources, EnvArg, EnvArgSpec, EnvLookup};
pub use error::{MoltError, Result};
pub use orchestrator::Orchestrator;
pub use runner::{ExecutionPlan, Reporter, RunReport, RunStatus};
pub use target::{Action, Target, TargetRegistry};

/// Current version of Molt
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
