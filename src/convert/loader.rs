//! Reads a directory of definition files and merges each one.

use super::error::{ConvertError, ConvertErrors};
use super::merger::merge_source;
use crate::config::{ConvertOptions, ErrorMode};
use crate::crd::CustomResourceDefinition;
use crate::definition::CompositeResourceDefinition;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Merges every regular file in `dir` into `crd`.
///
/// Sub-directories are skipped. Returns the number of files merged.
pub fn merge_directory(
    crd: &mut CustomResourceDefinition,
    dir: &Path,
    opts: &ConvertOptions,
) -> Result<usize, ConvertError> {
    let files = list_files(dir, opts.sort_entries)?;
    let mut errs = ConvertErrors::new();
    let mut merged = 0;

    for file in files {
        match merge_file(crd, &file) {
            Ok(()) => merged += 1,
            Err(e) => match opts.error_mode {
                ErrorMode::FailFast => return Err(e),
                ErrorMode::CollectAll => errs.add(e),
            },
        }
    }

    if errs.is_empty() {
        Ok(merged)
    } else {
        Err(ConvertError::Multiple(errs))
    }
}

/// Lists the regular files of `dir`, optionally sorted by file name.
pub fn list_files(dir: &Path, sort: bool) -> Result<Vec<PathBuf>, ConvertError> {
    let dir_err = |source| ConvertError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(dir_err)? {
        let path = entry.map_err(dir_err)?.path();
        if path.is_dir() {
            debug!(path = %path.display(), "skipping directory");
            continue;
        }
        files.push(path);
    }

    if sort {
        files.sort();
    }
    Ok(files)
}

/// Reads and parses a single definition file.
pub fn load_source(path: &Path) -> Result<CompositeResourceDefinition, ConvertError> {
    let content = fs::read(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    CompositeResourceDefinition::from_slice(&content).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn merge_file(crd: &mut CustomResourceDefinition, path: &Path) -> Result<(), ConvertError> {
    let source = load_source(path)?;
    debug!(
        path = %path.display(),
        versions = source.spec.versions.len(),
        "loaded definition"
    );

    merge_source(crd, &source).map_err(|source| ConvertError::Merge {
        path: path.to_path_buf(),
        source,
    })
}
