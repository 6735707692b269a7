use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::history::HISTORY_FILE_PREFIX;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
}

impl FileEntry {
    pub fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Recursively enumerate files under a target directory.
///
/// Hidden entries (and everything below a hidden directory) are skipped, as
/// are history files written by previous runs. Results are sorted by path so
/// processing order is deterministic.
pub fn scan_files(target: &Path) -> Result<Vec<FileEntry>, ScannerError> {
    debug!(path = ?target, "Scanning directory");

    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    let mut entries = Vec::new();

    let walker = WalkDir::new(target)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                let denied = err
                    .io_error()
                    .map(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
                    .unwrap_or(false);

                if denied {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| target.to_path_buf());
                    return Err(ScannerError::PermissionDenied(path));
                }

                return Err(ScannerError::IoError(err.into()));
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();

        if name.starts_with(HISTORY_FILE_PREFIX) {
            trace!(name = %name, "Skipping history file");
            continue;
        }

        trace!(entry = ?entry.path(), "Found file");
        entries.push(FileEntry::new(name, entry.into_path()));
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(count = entries.len(), "Scan complete");

    Ok(entries)
}
