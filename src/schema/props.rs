//! Structural JSON schema properties as carried by CRD versions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSONSchemaProps is the subset of an OpenAPI v3 schema node that the
/// converter needs to understand. Everything else is kept verbatim in
/// `extra` and written back out untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JSONSchemaProps {
    /// Schema type (object, array, string, integer, number, boolean).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Properties for object types.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, JSONSchemaProps>,

    /// Required property names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Items schema for array types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JSONSchemaProps>>,

    /// Additional properties for map types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<AdditionalProperties>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<serde_json::Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<serde_json::Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(
        rename = "x-kubernetes-preserve-unknown-fields",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub x_kubernetes_preserve_unknown_fields: Option<bool>,

    /// CEL validation rules.
    #[serde(
        rename = "x-kubernetes-validations",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub x_kubernetes_validations: Vec<ValidationRule>,

    /// Any other keyword, passed through as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(JSONSchemaProps),
}

/// A single entry of `x-kubernetes-validations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    pub rule: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_expression: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_path: Option<String>,
}

impl JSONSchemaProps {
    /// Creates a node of the given type.
    pub fn typed(schema_type: impl Into<String>) -> Self {
        JSONSchemaProps {
            schema_type: Some(schema_type.into()),
            ..Default::default()
        }
    }

    /// Creates an empty object node.
    pub fn object() -> Self {
        Self::typed("object")
    }

    /// Adds a property, returning the updated node.
    pub fn with_property(mut self, name: impl Into<String>, props: JSONSchemaProps) -> Self {
        self.properties.insert(name.into(), props);
        self
    }

    /// Marks a property as required, returning the updated node.
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Returns true if the node is an object, either explicitly or by
    /// declaring properties without a type.
    pub fn is_object(&self) -> bool {
        match self.schema_type.as_deref() {
            Some("object") => true,
            None => true,
            Some(_) => false,
        }
    }

    /// Returns the names of this node's properties.
    pub fn field_names(&self) -> Vec<String> {
        prop_fields(&self.properties)
    }
}

/// Returns the field names of a map of schema properties.
pub fn prop_fields(props: &BTreeMap<String, JSONSchemaProps>) -> Vec<String> {
    props.keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested_properties() {
        let yaml = r#"
type: object
required: [size]
properties:
  size:
    type: integer
    minimum: 1
  tags:
    type: array
    items:
      type: string
  labels:
    type: object
    additionalProperties:
      type: string
"#;
        let props: JSONSchemaProps = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(props.schema_type.as_deref(), Some("object"));
        assert_eq!(props.required, vec!["size".to_string()]);
        assert_eq!(props.field_names(), vec!["labels", "size", "tags"]);

        let size = &props.properties["size"];
        assert_eq!(size.minimum, Some(serde_json::Number::from(1)));

        let tags = &props.properties["tags"];
        assert_eq!(
            tags.items.as_deref().and_then(|i| i.schema_type.as_deref()),
            Some("string")
        );

        match props.properties["labels"].additional_properties.as_deref() {
            Some(AdditionalProperties::Schema(s)) => {
                assert_eq!(s.schema_type.as_deref(), Some("string"))
            }
            other => panic!("unexpected additionalProperties: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_keywords_pass_through() {
        let yaml = r#"
type: string
maxLength: 63
x-kubernetes-validations:
  - rule: "self != ''"
    message: must not be empty
"#;
        let props: JSONSchemaProps = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(props.extra.get("maxLength"), Some(&serde_json::json!(63)));
        assert_eq!(props.x_kubernetes_validations.len(), 1);
        assert_eq!(props.x_kubernetes_validations[0].rule, "self != ''");

        let out = serde_json::to_value(&props).unwrap();
        assert_eq!(out["maxLength"], serde_json::json!(63));
        assert_eq!(out["type"], serde_json::json!("string"));
    }

    #[test]
    fn test_prop_fields() {
        let props = JSONSchemaProps::object()
            .with_property("b", JSONSchemaProps::typed("string"))
            .with_property("a", JSONSchemaProps::typed("integer"));

        let mut fields = prop_fields(&props.properties);
        fields.sort();
        assert_eq!(fields, vec!["a", "b"]);
        assert!(prop_fields(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_is_object() {
        assert!(JSONSchemaProps::object().is_object());
        assert!(JSONSchemaProps::default().is_object());
        assert!(!JSONSchemaProps::typed("string").is_object());
    }
}
