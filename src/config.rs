//! Fixed naming constants and conversion options.

/// Label key prefix for resources composed from a composite resource.
pub const LABEL_KEY_NAME_PREFIX_FOR_COMPOSED: &str = "crossplane.io/composite-resource.";

/// Label key prefix carrying the name of the claim bound to a composite.
pub const LABEL_KEY_CLAIM_NAME: &str = "crossplane.io/composite-resource-claim.";

/// Label key prefix carrying the namespace of the claim bound to a composite.
pub const LABEL_KEY_CLAIM_NAMESPACE: &str = "crossplane.io/composite-resource-claim-namespace.";

/// Default label value.
pub const LABEL_VALUE_DEFAULT: &str = "default";

/// Category appended to the names of every generated CRD.
pub const CATEGORY_COMPOSITE: &str = "composite";

/// Scope of every generated CRD.
pub const SCOPE_CLUSTER: &str = "Cluster";

/// API version of the generated document.
pub const CRD_API_VERSION: &str = "apiextensions.k8s.io/v1";

/// Kind of the generated document.
pub const CRD_KIND: &str = "CustomResourceDefinition";

/// ErrorMode controls what happens when a file in the source directory fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Stop at the first failing file.
    #[default]
    FailFast,
    /// Keep going and report every failure together.
    CollectAll,
}

/// Options for a single conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Process directory entries in file name order instead of listing order.
    pub sort_entries: bool,
    pub error_mode: ErrorMode,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            sort_entries: true,
            error_mode: ErrorMode::FailFast,
        }
    }
}

impl ConvertOptions {
    /// Creates the default options: sorted entries, fail fast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether directory entries are sorted by file name.
    pub fn with_sort_entries(mut self, sort_entries: bool) -> Self {
        self.sort_entries = sort_entries;
        self
    }

    /// Sets how failing files are reported.
    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefixes_end_with_separator() {
        for prefix in [
            LABEL_KEY_NAME_PREFIX_FOR_COMPOSED,
            LABEL_KEY_CLAIM_NAME,
            LABEL_KEY_CLAIM_NAMESPACE,
        ] {
            assert!(prefix.starts_with("crossplane.io/"));
            assert!(prefix.ends_with('.'));
        }
        assert_eq!(LABEL_VALUE_DEFAULT, "default");
        assert_eq!(CATEGORY_COMPOSITE, "composite");
    }

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert!(opts.sort_entries);
        assert_eq!(opts.error_mode, ErrorMode::FailFast);

        let opts = ConvertOptions::new()
            .with_sort_entries(false)
            .with_error_mode(ErrorMode::CollectAll);
        assert!(!opts.sort_entries);
        assert_eq!(opts.error_mode, ErrorMode::CollectAll);
    }
}
