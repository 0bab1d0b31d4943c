//! Conversion error types.

use crate::schema::SchemaErrors;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which half of a version schema was being merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStage {
    Spec,
    Status,
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStage::Spec => write!(f, "spec"),
            MergeStage::Status => write!(f, "status"),
        }
    }
}

/// MergeError reports a structurally invalid fragment in a source definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to merge CRD {stage} for version {version:?}")]
pub struct MergeError {
    pub stage: MergeStage,
    pub version: String,
    pub source: SchemaErrors,
}

impl MergeError {
    pub fn new(stage: MergeStage, version: impl Into<String>, source: SchemaErrors) -> Self {
        MergeError {
            stage,
            version: version.into(),
            source,
        }
    }
}

/// ConvertError is the error returned by a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read directory {}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read file {}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to unmarshal XRD file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to convert XRD file {}", .path.display())]
    Merge {
        path: PathBuf,
        #[source]
        source: MergeError,
    },

    #[error("{0}")]
    Multiple(ConvertErrors),
}

impl ConvertError {
    /// Returns the path the error refers to, if it refers to exactly one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConvertError::DirectoryRead { path, .. }
            | ConvertError::FileRead { path, .. }
            | ConvertError::Parse { path, .. }
            | ConvertError::Merge { path, .. } => Some(path),
            ConvertError::Multiple(_) => None,
        }
    }
}

/// ConvertErrors is a collection of per-file failures.
#[derive(Debug, Default)]
pub struct ConvertErrors {
    errors: Vec<ConvertError>,
}

impl ConvertErrors {
    pub fn new() -> Self {
        ConvertErrors { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ConvertError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConvertError> {
        self.errors.iter()
    }
}

impl IntoIterator for ConvertErrors {
    type Item = ConvertError;
    type IntoIter = std::vec::IntoIter<ConvertError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ConvertErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} file(s) failed to convert", self.errors.len())?;
        for err in &self.errors {
            write!(f, "\n  - {}", err)?;
            let mut cause = std::error::Error::source(err);
            while let Some(c) = cause {
                write!(f, ": {}", c)?;
                cause = std::error::Error::source(c);
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConvertErrors {}
