use std::fs;
use thiserror::Error;
use tracing::{debug, info};

use crate::normalizer::normalize_filename;
use crate::progress::Progress;
use crate::scanner::FileEntry;

use super::types::{RenameOperation, RenameResult, SkippedRename};

/// Errors that can occur while executing a rename batch
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Failed to rename '{from}' to '{to}': {source}")]
    FilesystemError {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },
}

/// Options for a rename batch
#[derive(Debug, Clone, Default)]
pub struct RenameOptions {
    pub dry_run: bool,
}

/// Rename every file whose normalized name differs from its current name.
///
/// Collisions with an existing destination are reported and skipped, never
/// overwritten. Under dry run the operations are collected but the
/// filesystem is untouched.
pub fn rename_receipts(
    entries: &[FileEntry],
    options: &RenameOptions,
    progress: &mut Progress,
) -> Result<RenameResult, RenameError> {
    let mut result = RenameResult::new(options.dry_run);

    let candidates: Vec<(&FileEntry, String)> = entries
        .iter()
        .filter_map(|entry| {
            let new_name = normalize_filename(&entry.name);
            if new_name != entry.name {
                Some((entry, new_name))
            } else {
                debug!(name = %entry.name, "Already canonical");
                None
            }
        })
        .collect();

    result.unchanged = entries.len() - candidates.len();

    let total = candidates.len();
    progress.rename_start(total, options.dry_run);

    info!("Preparing to rename {} of {} files", total, entries.len());

    for (i, (entry, new_name)) in candidates.iter().enumerate() {
        let op = RenameOperation::new(entry.path.clone(), new_name.clone());

        if op.destination_path.exists() {
            progress.warn(&format!(
                "Skipping '{}': destination '{}' already exists",
                op.source_name, op.destination_name
            ));
            result.add_skip(SkippedRename {
                source_name: op.source_name,
                destination_name: op.destination_name,
            });
            continue;
        }

        progress.rename_progress(i + 1, total, &op.source_name, &op.destination_name);

        if !options.dry_run {
            fs::rename(&op.source_path, &op.destination_path).map_err(|e| {
                RenameError::FilesystemError {
                    from: op.source_name.clone(),
                    to: op.destination_name.clone(),
                    source: e,
                }
            })?;

            info!("Renamed: {} -> {}", op.source_name, op.destination_name);
        }

        result.add_operation(op);
    }

    progress.rename_complete(result.len(), options.dry_run);

    Ok(result)
}
