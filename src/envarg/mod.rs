//! Environment arguments
//!
//! Named configuration values resolved once per run from `--arg`
//! overrides, the process environment, envargs files, or a default.

pub mod file;
pub mod model;
pub mod sources;

pub use file::*;
pub use model::*;
pub use sources::*;
