//! Folds one source definition into the CRD being built.

use super::error::{MergeError, MergeStage};
use crate::config::CATEGORY_COMPOSITE;
use crate::crd::CustomResourceDefinition;
use crate::definition::{CompositeResourceDefinition, CompositeResourceDefinitionVersion};
use crate::schema::{validate_fragment, JSONSchemaProps, SchemaError, SchemaErrors};
use tracing::{debug, warn};

/// Merges the spec and then the status schemas of every version declared by
/// `source` into `crd`.
///
/// The spec and status payloads of each version are replaced wholesale: a
/// later source declaring the same version name wins, fields are never
/// unioned. Served, storage and deprecation flags are only taken from a
/// source when it introduces the version.
pub fn merge_source(
    crd: &mut CustomResourceDefinition,
    source: &CompositeResourceDefinition,
) -> Result<(), MergeError> {
    adopt_identity(crd, source);
    merge_spec(crd, &source.spec.versions)?;
    merge_status(crd, &source.spec.versions)?;
    Ok(())
}

/// Writes each version's spec fragment into the CRD.
pub fn merge_spec(
    crd: &mut CustomResourceDefinition,
    versions: &[CompositeResourceDefinitionVersion],
) -> Result<(), MergeError> {
    for version in versions {
        let spec = checked(MergeStage::Spec, version, version.spec_schema())?;

        let appended = crd.version(&version.name).is_none();
        let entry = crd.version_entry(&version.name);
        if entry.spec_schema().is_some() {
            warn!(version = %version.name, "replacing previously merged spec schema");
        }
        // Flags of a version that already exists stay as first declared.
        if appended {
            entry.served = version.served;
            entry.storage = version.referenceable;
            entry.deprecated = version.deprecated;
            entry.deprecation_warning = version.deprecation_warning.clone();
        }
        entry.set_spec_schema(spec);
        debug!(version = %version.name, "merged spec schema");
    }
    Ok(())
}

/// Writes each version's status fragment into the CRD.
pub fn merge_status(
    crd: &mut CustomResourceDefinition,
    versions: &[CompositeResourceDefinitionVersion],
) -> Result<(), MergeError> {
    for version in versions {
        let status = checked(MergeStage::Status, version, version.status_schema())?;

        let entry = crd.version_entry(&version.name);
        if status.is_some() && entry.status_schema().is_some() {
            warn!(version = %version.name, "replacing previously merged status schema");
        }
        entry.set_status_schema(status);
        debug!(version = %version.name, "merged status schema");
    }
    Ok(())
}

fn checked(
    stage: MergeStage,
    version: &CompositeResourceDefinitionVersion,
    fragment: Option<&JSONSchemaProps>,
) -> Result<Option<JSONSchemaProps>, MergeError> {
    if version.name.is_empty() {
        return Err(MergeError::new(
            stage,
            "",
            SchemaErrors::from_error(SchemaError::EmptyVersionName),
        ));
    }
    match fragment {
        Some(props) => {
            validate_fragment(props).map_err(|e| MergeError::new(stage, &version.name, e))?;
            Ok(Some(props.clone()))
        }
        None => Ok(None),
    }
}

// Fills in group and names when the descriptor left them empty.
fn adopt_identity(crd: &mut CustomResourceDefinition, source: &CompositeResourceDefinition) {
    let group = &source.spec.group;
    if crd.spec.group.is_empty() {
        crd.spec.group = group.clone();
    } else if !group.is_empty() && *group != crd.spec.group {
        warn!(
            expected = %crd.spec.group,
            found = %group,
            "source definition declares a different group, ignoring it"
        );
    }

    if crd.spec.names.kind.is_empty() && !source.spec.names.kind.is_empty() {
        let names = &mut crd.spec.names;
        let from = &source.spec.names;
        fill(&mut names.kind, &from.kind);
        fill(&mut names.plural, &from.plural);
        fill(&mut names.singular, &from.singular);
        fill(&mut names.list_kind, &from.list_kind);
        if names.short_names.is_empty() {
            names.short_names = from.short_names.clone();
        }

        // The composite category stays last.
        names.categories.retain(|c| c != CATEGORY_COMPOSITE);
        for category in &from.categories {
            names.ensure_category(category);
        }
        names.ensure_category(CATEGORY_COMPOSITE);
    }
}

fn fill(target: &mut String, from: &str) {
    if target.is_empty() {
        *target = from.to_string();
    }
}
