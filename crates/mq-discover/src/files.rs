//! Filesystem helpers shared by the adapters

use crate::error::{DiscoverError, DiscoverResult};
use std::path::{Path, PathBuf};

/// Directory names never searched for migrations
const SKIPPED_DIRS: &[&str] = &["site-packages", "node_modules", "__pycache__"];

/// Every file under `root` matching the relative glob `pattern`, sorted.
///
/// Hidden directories and third-party package directories are skipped.
pub(crate) fn find_under(root: &Path, pattern: &str) -> Vec<PathBuf> {
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        pattern
    );
    let paths = match glob::glob(&full) {
        Ok(paths) => paths,
        Err(e) => {
            log::warn!("Invalid search pattern '{}': {}", full, e);
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::debug!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|path| !is_skipped(root, path))
        .collect();
    found.sort();
    found
}

fn is_skipped(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
    })
}

/// Python files directly inside `dir`, sorted by name
pub(crate) fn python_files(dir: &Path) -> DiscoverResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| DiscoverError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoverError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "py") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read a source file, replacing invalid UTF-8
pub(crate) fn read_source(path: &Path) -> DiscoverResult<String> {
    let bytes = std::fs::read(path).map_err(|source| DiscoverError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// File name without its extension
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
