//! Expansion of `-s` path specifiers into a flat list of candidate files.

use crate::error::{ReconError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Returns true when the specifier should be handed to the glob matcher
/// instead of being stat'ed as a literal path.
pub fn is_glob_pattern(specifier: &str) -> bool {
    specifier.contains('*')
}

/// Expand every specifier, in input order, into candidate file paths.
///
/// Glob matches are appended as-is (duplicates included). Files found by
/// walking a directory, or named directly, are only appended when not
/// already present. A literal path that does not exist is fatal; a glob
/// that matches nothing is not.
pub fn expand_paths<S: AsRef<str>>(specifiers: &[S]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for specifier in specifiers {
        let specifier = specifier.as_ref();
        debug!("Reviewing path: {}", specifier);

        if is_glob_pattern(specifier) {
            files.extend(glob_matches(specifier));
            continue;
        }

        let path = Path::new(specifier);
        let metadata = fs::metadata(path).map_err(|_| ReconError::PathNotFound {
            path: path.to_path_buf(),
        })?;

        if metadata.is_dir() {
            walk_directory(path, &mut files);
        } else if metadata.is_file() {
            push_unique(&mut files, path.to_path_buf());
        } else {
            debug!("Skipping special file: {}", path.display());
        }
    }

    info!("Total number of files: {}", files.len());
    Ok(files)
}

fn glob_matches(pattern: &str) -> Vec<PathBuf> {
    let entries = match glob::glob(pattern) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Invalid glob pattern {}: {}", pattern, e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("Unreadable glob match: {}", e);
                None
            }
        })
        .collect()
}

fn walk_directory(root: &Path, files: &mut Vec<PathBuf>) {
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        // Symlinks are not followed, so their file type is never "file".
        if entry.file_type().is_file() {
            push_unique(files, entry.into_path());
        }
    }
}

// Linear scan; signature sets stay in the low thousands.
fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}
