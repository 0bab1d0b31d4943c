//! Structural checks applied to schema fragments before they are merged.

use super::props::{AdditionalProperties, JSONSchemaProps};
use std::fmt;
use thiserror::Error;

const KNOWN_TYPES: &[&str] = &["object", "array", "string", "integer", "number", "boolean"];

/// SchemaError describes a single structural defect in a schema fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("version name must not be empty")]
    EmptyVersionName,

    #[error("{path}: expected an object schema, got {actual}")]
    NotAnObject { path: String, actual: String },

    #[error("{path}: unknown type: {actual}")]
    UnknownType { path: String, actual: String },

    #[error("{path}: properties declared on non-object type {actual}")]
    PropertiesOnNonObject { path: String, actual: String },

    #[error("{path}: required field {field} is not declared in properties")]
    UndeclaredRequired { path: String, field: String },

    #[error("{path}: array schema has no items")]
    MissingItems { path: String },
}

/// SchemaErrors is a collection of structural errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaErrors {
    errors: Vec<SchemaError>,
}

impl SchemaErrors {
    pub fn new() -> Self {
        SchemaErrors { errors: Vec::new() }
    }

    /// Creates SchemaErrors from a single error.
    pub fn from_error(error: SchemaError) -> Self {
        SchemaErrors {
            errors: vec![error],
        }
    }

    pub fn add(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.errors.iter()
    }
}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Checks that a spec or status fragment is a well-formed property tree.
///
/// The root must be an object. Below it, every node is checked for a known
/// type, `properties` only on objects, `items` on arrays, and `required`
/// entries that name declared properties.
pub fn validate_fragment(props: &JSONSchemaProps) -> Result<(), SchemaErrors> {
    let mut errs = SchemaErrors::new();

    if !props.is_object() {
        errs.add(SchemaError::NotAnObject {
            path: ".".to_string(),
            actual: props.schema_type.clone().unwrap_or_default(),
        });
        return Err(errs);
    }

    walk(props, ".", &mut errs);

    if errs.is_empty() {
        Ok(())
    } else {
        Err(errs)
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == "." {
        format!(".{}", name)
    } else {
        format!("{}.{}", parent, name)
    }
}

fn walk(props: &JSONSchemaProps, path: &str, errs: &mut SchemaErrors) {
    if let Some(t) = props.schema_type.as_deref() {
        if !KNOWN_TYPES.contains(&t) {
            errs.add(SchemaError::UnknownType {
                path: path.to_string(),
                actual: t.to_string(),
            });
        }
        if t != "object" && !props.properties.is_empty() {
            errs.add(SchemaError::PropertiesOnNonObject {
                path: path.to_string(),
                actual: t.to_string(),
            });
        }
        if t == "array" && props.items.is_none() {
            errs.add(SchemaError::MissingItems {
                path: path.to_string(),
            });
        }
    }

    // Open objects may require keys that are not listed.
    let open = props.x_kubernetes_preserve_unknown_fields == Some(true)
        || props.additional_properties.is_some();
    if !open {
        for field in &props.required {
            if !props.properties.contains_key(field) {
                errs.add(SchemaError::UndeclaredRequired {
                    path: path.to_string(),
                    field: field.clone(),
                });
            }
        }
    }

    for (name, child) in &props.properties {
        walk(child, &child_path(path, name), errs);
    }
    if let Some(items) = &props.items {
        walk(items, &format!("{}[]", path), errs);
    }
    if let Some(AdditionalProperties::Schema(s)) = props.additional_properties.as_deref() {
        walk(s, &child_path(path, "*"), errs);
    }
}
