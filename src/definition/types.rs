//! Composite resource definition input types.

use crate::crd::{Names, ObjectMeta};
use crate::schema::JSONSchemaProps;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CompositeResourceDefinition is both the top-level descriptor handed to the
/// converter and the shape of every file found in its directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResourceDefinition {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: CompositeResourceDefinitionSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeResourceDefinitionSpec {
    #[serde(default)]
    pub group: String,

    #[serde(default)]
    pub names: Names,

    #[serde(default)]
    pub versions: Vec<CompositeResourceDefinitionVersion>,

    /// Directory of definition files whose schemas are merged in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// A single version declared by a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResourceDefinitionVersion {
    pub name: String,

    #[serde(default = "default_served")]
    pub served: bool,

    /// The referenceable version becomes the CRD's storage version.
    #[serde(default)]
    pub referenceable: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<CompositeResourceValidation>,
}

fn default_served() -> bool {
    true
}

/// Spec and status fragments of a version's schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeResourceValidation {
    /// Fields supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<JSONSchemaProps>,

    /// Fields computed and reported back by the system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JSONSchemaProps>,
}

impl CompositeResourceDefinition {
    /// Parses a definition from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parses a definition from raw YAML bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_slice(bytes)
    }

    /// Returns the source directory, if one is set and non-empty.
    pub fn directory(&self) -> Option<&std::path::Path> {
        self.spec
            .directory
            .as_deref()
            .filter(|d| !d.as_os_str().is_empty())
    }
}

impl CompositeResourceDefinitionVersion {
    pub fn spec_schema(&self) -> Option<&JSONSchemaProps> {
        self.schema.as_ref().and_then(|s| s.spec.as_ref())
    }

    pub fn status_schema(&self) -> Option<&JSONSchemaProps> {
        self.schema.as_ref().and_then(|s| s.status.as_ref())
    }
}
