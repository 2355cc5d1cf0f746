//! Recursive discovery of source documents.

use super::error::DiscoveryError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Lists every file under `root` with the given extension, as absolute paths.
///
/// The walk is depth-first with directory entries sorted by file name, so the
/// result only changes when the tree does. Dot-files are skipped.
pub fn discover_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = match root.canonicalize() {
        Ok(path) if path.is_dir() => path,
        _ => return Err(DiscoveryError::NotFound(root.to_path_buf())),
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && !is_hidden(path) && has_extension(path, extension) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}
