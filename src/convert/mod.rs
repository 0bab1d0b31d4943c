//! Convert module - Turns composite resource definitions into a CRD.
//!
//! The assembler seeds the CRD from the top-level definition, the loader
//! walks its directory and the merger folds each file's version schemas in.

mod assembler;
mod error;
mod loader;
mod merger;

#[cfg(test)]
mod convert_test;

pub use assembler::*;
pub use error::*;
pub use loader::*;
pub use merger::*;
