//! Builds the CRD for a composite resource definition.

use super::error::ConvertError;
use super::loader::merge_directory;
use crate::config::{ConvertOptions, CATEGORY_COMPOSITE};
use crate::crd::{CustomResourceDefinition, CustomResourceDefinitionVersion};
use crate::definition::CompositeResourceDefinition;
use tracing::info;

/// Produces the CRD for `xrd` with default options.
pub fn for_composite_resource(
    xrd: &CompositeResourceDefinition,
) -> Result<CustomResourceDefinition, ConvertError> {
    for_composite_resource_with_options(xrd, &ConvertOptions::default())
}

/// Produces the CRD for `xrd`, merging in every definition file found in
/// its directory. Nothing is returned unless every file merges cleanly.
pub fn for_composite_resource_with_options(
    xrd: &CompositeResourceDefinition,
    opts: &ConvertOptions,
) -> Result<CustomResourceDefinition, ConvertError> {
    let mut crd = CustomResourceDefinition::new();
    crd.metadata.name = xrd.metadata.name.clone();
    crd.metadata.labels = xrd.metadata.labels.clone();
    crd.spec.group = xrd.spec.group.clone();
    crd.spec.names = xrd.spec.names.clone();
    crd.spec.names.ensure_category(CATEGORY_COMPOSITE);

    crd.spec.versions = xrd
        .spec
        .versions
        .iter()
        .map(|v| CustomResourceDefinitionVersion {
            served: v.served,
            storage: v.referenceable,
            deprecated: v.deprecated,
            deprecation_warning: v.deprecation_warning.clone(),
            ..CustomResourceDefinitionVersion::new(&v.name)
        })
        .collect();

    let mut files = 0;
    if let Some(dir) = xrd.directory() {
        files = merge_directory(&mut crd, dir, opts)?;
    }

    if crd.metadata.name.is_empty()
        && !crd.spec.names.plural.is_empty()
        && !crd.spec.group.is_empty()
    {
        crd.metadata.name = format!("{}.{}", crd.spec.names.plural, crd.spec.group);
    }

    info!(
        name = %crd.metadata.name,
        files,
        versions = crd.spec.versions.len(),
        "generated CRD"
    );
    Ok(crd)
}
