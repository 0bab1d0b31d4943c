//! CustomResourceDefinition document types.

use crate::config::{CRD_API_VERSION, CRD_KIND, SCOPE_CLUSTER};
use crate::schema::JSONSchemaProps;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SPEC_KEY: &str = "spec";
const STATUS_KEY: &str = "status";

/// Object metadata shared by definitions and CRDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Resource naming: kind, plural, singular and friends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Names {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plural: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub singular: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub list_kind: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub short_names: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Names {
    /// Appends a category unless it is already listed.
    pub fn ensure_category(&mut self, category: &str) {
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
    }
}

/// CustomResourceDefinition is the merged output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinition {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: CustomResourceDefinitionSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomResourceDefinitionSpec {
    pub group: String,
    pub names: Names,
    pub scope: String,
    #[serde(default)]
    pub versions: Vec<CustomResourceDefinitionVersion>,
}

/// A single served version of the resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResourceDefinitionVersion {
    pub name: String,
    pub served: bool,
    pub storage: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<CustomResourceValidation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subresources: Option<CustomResourceSubresources>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomResourceValidation {
    #[serde(rename = "openAPIV3Schema")]
    pub open_api_v3_schema: JSONSchemaProps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomResourceSubresources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomResourceSubresourceStatus>,
}

/// Enables the status subresource. Serialises as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomResourceSubresourceStatus {}

impl Default for CustomResourceDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomResourceDefinition {
    /// Creates an empty, cluster scoped CRD.
    pub fn new() -> Self {
        CustomResourceDefinition {
            api_version: CRD_API_VERSION.to_string(),
            kind: CRD_KIND.to_string(),
            metadata: ObjectMeta::default(),
            spec: CustomResourceDefinitionSpec {
                scope: SCOPE_CLUSTER.to_string(),
                ..Default::default()
            },
        }
    }

    /// Returns the version with the given name.
    pub fn version(&self, name: &str) -> Option<&CustomResourceDefinitionVersion> {
        self.spec.versions.iter().find(|v| v.name == name)
    }

    /// Returns the version with the given name, appending an empty one if
    /// none exists yet.
    pub fn version_entry(&mut self, name: &str) -> &mut CustomResourceDefinitionVersion {
        let idx = match self.spec.versions.iter().position(|v| v.name == name) {
            Some(idx) => idx,
            None => {
                self.spec
                    .versions
                    .push(CustomResourceDefinitionVersion::new(name));
                self.spec.versions.len() - 1
            }
        };
        &mut self.spec.versions[idx]
    }

    pub fn version_names(&self) -> Vec<&str> {
        self.spec.versions.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl CustomResourceDefinitionVersion {
    /// Creates a served, non-storage version with no schema.
    pub fn new(name: impl Into<String>) -> Self {
        CustomResourceDefinitionVersion {
            name: name.into(),
            served: true,
            ..Default::default()
        }
    }

    /// Returns the spec fragment of this version's schema.
    pub fn spec_schema(&self) -> Option<&JSONSchemaProps> {
        self.fragment(SPEC_KEY)
    }

    /// Returns the status fragment of this version's schema.
    pub fn status_schema(&self) -> Option<&JSONSchemaProps> {
        self.fragment(STATUS_KEY)
    }

    /// Replaces (or with `None`, removes) the spec fragment.
    pub fn set_spec_schema(&mut self, props: Option<JSONSchemaProps>) {
        self.set_fragment(SPEC_KEY, props);
    }

    /// Replaces (or with `None`, removes) the status fragment and keeps the
    /// status subresource in step with it.
    pub fn set_status_schema(&mut self, props: Option<JSONSchemaProps>) {
        let enabled = props.is_some();
        self.set_fragment(STATUS_KEY, props);
        self.subresources = if enabled {
            Some(CustomResourceSubresources {
                status: Some(CustomResourceSubresourceStatus {}),
            })
        } else {
            None
        };
    }

    fn fragment(&self, key: &str) -> Option<&JSONSchemaProps> {
        self.schema
            .as_ref()
            .and_then(|s| s.open_api_v3_schema.properties.get(key))
    }

    fn set_fragment(&mut self, key: &str, props: Option<JSONSchemaProps>) {
        match props {
            Some(props) => {
                let root = &mut self
                    .schema
                    .get_or_insert_with(|| CustomResourceValidation {
                        open_api_v3_schema: JSONSchemaProps::object(),
                    })
                    .open_api_v3_schema;
                root.properties.insert(key.to_string(), props);
            }
            None => {
                if let Some(schema) = self.schema.as_mut() {
                    schema.open_api_v3_schema.properties.remove(key);
                    if schema.open_api_v3_schema.properties.is_empty() {
                        self.schema = None;
                    }
                }
            }
        }
    }
}
