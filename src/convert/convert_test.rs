//! End-to-end conversion tests over scratch directories.

#[cfg(test)]
mod tests {
    use crate::config::{ConvertOptions, CATEGORY_COMPOSITE};
    use crate::convert::{for_composite_resource, for_composite_resource_with_options, ConvertError};
    use crate::definition::CompositeResourceDefinition;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const SIZE_V1ALPHA1: &str = r#"
apiVersion: apiextensions.crossplane.io/v1
kind: CompositeResourceDefinition
spec:
  group: example.org
  versions:
    - name: v1alpha1
      schema:
        spec:
          type: object
          properties:
            size:
              type: integer
"#;

    const READY_V1: &str = r#"
apiVersion: apiextensions.crossplane.io/v1
kind: CompositeResourceDefinition
spec:
  group: example.org
  versions:
    - name: v1
      referenceable: true
      schema:
        status:
          type: object
          properties:
            ready:
              type: boolean
"#;

    fn descriptor(dir: &Path, categories: &[&str]) -> CompositeResourceDefinition {
        let mut xrd = CompositeResourceDefinition::from_yaml(
            r#"
metadata:
  name: xclusters.example.org
  labels:
    app.kubernetes.io/part-of: platform
spec:
  group: example.org
  names:
    kind: XCluster
    plural: xclusters
"#,
        )
        .unwrap();
        xrd.spec.directory = Some(dir.to_path_buf());
        xrd.spec.names.categories = categories.iter().map(|c| c.to_string()).collect();
        xrd
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_two_files_two_versions() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.yaml", SIZE_V1ALPHA1);
        write(dir.path(), "b.yaml", READY_V1);

        let crd = for_composite_resource(&descriptor(dir.path(), &[])).unwrap();

        assert_eq!(crd.spec.group, "example.org");
        assert_eq!(crd.version_names(), vec!["v1alpha1", "v1"]);

        let alpha = crd.version("v1alpha1").unwrap();
        assert_eq!(alpha.spec_schema().unwrap().field_names(), vec!["size"]);
        assert!(alpha.status_schema().is_none());

        let v1 = crd.version("v1").unwrap();
        assert_eq!(v1.status_schema().unwrap().field_names(), vec!["ready"]);
        assert!(v1.spec_schema().is_none());
        assert!(v1.storage);

        assert!(crd.spec.names.categories.contains(&CATEGORY_COMPOSITE.to_string()));
        assert_eq!(
            crd.metadata.labels.get("app.kubernetes.io/part-of").map(String::as_str),
            Some("platform")
        );
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.yaml", SIZE_V1ALPHA1);
        write(dir.path(), "b.yaml", READY_V1);
        let xrd = descriptor(dir.path(), &[]);

        let first = for_composite_resource(&xrd).unwrap().to_yaml().unwrap();
        let second = for_composite_resource(&xrd).unwrap().to_yaml().unwrap();
        assert_eq!(first, second);

        let first = for_composite_resource(&xrd).unwrap().to_json().unwrap();
        let second = for_composite_resource(&xrd).unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_file_wins_for_same_version() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "a.yaml",
            "spec:\n  versions:\n    - name: v1\n      schema:\n        spec:\n          properties:\n            first:\n              type: string\n",
        );
        write(
            dir.path(),
            "b.yaml",
            "spec:\n  versions:\n    - name: v1\n      schema:\n        spec:\n          properties:\n            second:\n              type: string\n",
        );

        let crd = for_composite_resource(&descriptor(dir.path(), &[])).unwrap();
        let v1 = crd.version("v1").unwrap();
        assert_eq!(v1.spec_schema().unwrap().field_names(), vec!["second"]);
        assert_eq!(crd.spec.versions.len(), 1);
    }

    #[test]
    fn test_declared_version_flags_survive_merge() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "a.yaml",
            "spec:\n  versions:\n    - name: v1\n      schema:\n        spec:\n          properties:\n            size:\n              type: integer\n",
        );
        let mut xrd = descriptor(dir.path(), &[]);
        xrd.spec.versions = CompositeResourceDefinition::from_yaml(
            "spec:\n  versions:\n    - name: v1\n      served: false\n      referenceable: true\n",
        )
        .unwrap()
        .spec
        .versions;

        let crd = for_composite_resource(&xrd).unwrap();
        let v1 = crd.version("v1").unwrap();
        assert!(!v1.served);
        assert!(v1.storage);
        assert_eq!(v1.spec_schema().unwrap().field_names(), vec!["size"]);
    }

    #[test]
    fn test_category_appended_exactly_once() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.yaml", SIZE_V1ALPHA1);

        let crd = for_composite_resource(&descriptor(dir.path(), &["crossplane", "infra"])).unwrap();
        assert_eq!(crd.spec.names.categories, vec!["crossplane", "infra", "composite"]);

        let crd = for_composite_resource(&descriptor(dir.path(), &["composite", "infra"])).unwrap();
        assert_eq!(crd.spec.names.categories, vec!["composite", "infra"]);
    }

    #[test]
    fn test_nested_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.yaml", SIZE_V1ALPHA1);
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        write(&nested, "b.yaml", READY_V1);

        let crd = for_composite_resource(&descriptor(dir.path(), &[])).unwrap();
        assert_eq!(crd.version_names(), vec!["v1alpha1"]);
    }

    #[test]
    fn test_one_bad_file_yields_no_document() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.yaml", SIZE_V1ALPHA1);
        write(dir.path(), "b.yaml", "spec:\n  versions: {not: [a list\n");
        write(dir.path(), "c.yaml", READY_V1);

        let result = for_composite_resource(&descriptor(dir.path(), &[]));
        match result {
            Err(ConvertError::Parse { path, .. }) => {
                assert_eq!(path, dir.path().join("b.yaml"));
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_structurally_invalid_file_yields_merge_error() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "a.yaml",
            "spec:\n  versions:\n    - name: v1\n      schema:\n        spec:\n          type: object\n          required: [size]\n",
        );

        let err = for_composite_resource(&descriptor(dir.path(), &[])).unwrap_err();
        assert!(matches!(err, ConvertError::Merge { .. }));
        assert_eq!(err.path(), Some(dir.path().join("a.yaml").as_path()));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let crd = for_composite_resource_with_options(
            &descriptor(dir.path(), &[]),
            &ConvertOptions::new().with_sort_entries(false),
        )
        .unwrap();
        assert!(crd.spec.versions.is_empty());
        assert_eq!(crd.metadata.name, "xclusters.example.org");
    }
}
