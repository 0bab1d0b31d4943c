//! Definition module - Composite resource definitions read as conversion input.

mod types;

pub use types::*;
