//! Turning command-line arguments into an ordered photo list.
//!
//! Files named explicitly are kept as given, in argument order, whatever
//! their extension. Directories contribute their immediate files with a
//! supported image extension, sorted by name. Duplicates are kept: selecting
//! the same photo twice produces two gallery entries.

use crate::imaging::is_supported_extension;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("photo not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("could not list {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("no photos selected")]
    Empty,
}

/// Expand files and directories into the ordered list of photos to organize.
pub fn expand(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, SourceError> {
    let mut photos = Vec::new();
    for input in inputs {
        if input.is_dir() {
            photos.extend(list_directory(input)?);
        } else if input.is_file() {
            photos.push(input.clone());
        } else {
            return Err(SourceError::NotFound(input.clone()));
        }
    }
    if photos.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(photos)
}

fn list_directory(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut photos = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| SourceError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && has_supported_extension(entry.path()) {
            photos.push(entry.into_path());
        }
    }
    tracing::debug!("{}: {} photos", dir.display(), photos.len());
    Ok(photos)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(is_supported_extension)
}
