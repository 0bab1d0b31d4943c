//! # XRD to CRD
//!
//! Folds a directory of Composite Resource Definitions into a single
//! Kubernetes CustomResourceDefinition.
//!
//! A top-level definition supplies the group, names, labels and declared
//! versions. Every file in its directory contributes `spec` and `status`
//! schema fragments per version; a later file declaring the same version
//! replaces the earlier one.
//!
//! ## Modules
//!
//! - [`config`] - Fixed label and category constants, conversion options
//! - [`schema`] - Structural property trees and their checks
//! - [`definition`] - Composite resource definition input documents
//! - [`crd`] - The CustomResourceDefinition output document
//! - [`convert`] - Assembler, directory loader and schema merger

pub mod config;
pub mod convert;
pub mod crd;
pub mod definition;
pub mod schema;

pub use config::{ConvertOptions, ErrorMode};
pub use convert::{
    for_composite_resource, for_composite_resource_with_options, ConvertError, ConvertErrors,
    MergeError, MergeStage,
};
pub use crd::CustomResourceDefinition;
pub use definition::CompositeResourceDefinition;
pub use schema::{prop_fields, JSONSchemaProps};
