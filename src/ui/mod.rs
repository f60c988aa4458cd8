//! Terminal presentation
//!
//! Target listings, run progress, and masking of sensitive values.

pub mod console;
pub mod list;
pub mod mask;

pub use console::*;
pub use list::*;
pub use mask::*;
