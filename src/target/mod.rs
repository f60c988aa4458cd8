//! Target model and registry

pub mod model;
pub mod registry;

pub use model::*;
pub use registry::*;
