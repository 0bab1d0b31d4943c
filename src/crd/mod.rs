//! CRD module - The CustomResourceDefinition document produced by a conversion.

mod types;

pub use types::*;
