//! Schema module - Structural property trees carried by CRD versions.
//!
//! The types here are deliberately shallow: enough to walk and check a
//! property tree, with unrecognised keywords preserved as opaque data.

mod props;
mod validation;

pub use props::*;
pub use validation::*;
