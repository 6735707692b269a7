use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use crate::rename::RenameResult;

use super::types::*;

/// Error types for history operations
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to write history file: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize history: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to read history file: {0}")]
    ReadError(String),

    #[error("History file version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
}

/// Write a history file for an executed rename batch
pub fn write_history(result: &RenameResult, target_dir: &Path) -> Result<PathBuf, HistoryError> {
    let history = create_history_from_result(result, target_dir);
    write_history_file(&history, target_dir)
}

fn create_history_from_result(result: &RenameResult, target_dir: &Path) -> HistoryFile {
    let changes: Vec<HistoryEntry> = result
        .operations
        .iter()
        .map(|op| HistoryEntry {
            source: relative_to(&op.source_path, target_dir),
            destination: relative_to(&op.destination_path, target_dir),
        })
        .collect();

    HistoryFile {
        version: HISTORY_VERSION.to_string(),
        executed_at: Utc::now(),
        operation: OperationType::Rename,
        target_directory: target_dir.to_path_buf(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        changes,
    }
}

fn relative_to(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

pub fn write_history_file(
    history: &HistoryFile,
    target_dir: &Path,
) -> Result<PathBuf, HistoryError> {
    let filename = history.generate_filename();
    let file_path = target_dir.join(&filename);

    // Two batches within the same second would collide on the timestamp name
    if file_path.exists() {
        warn!("History file already exists: {:?}", file_path);
        let unique_filename = format!(
            "{}{}-{}.json",
            HISTORY_FILE_PREFIX,
            history.executed_at.format("%Y%m%d-%H%M%S"),
            history.executed_at.timestamp_subsec_millis()
        );
        let unique_path = target_dir.join(unique_filename);
        return write_to_path(history, &unique_path);
    }

    write_to_path(history, &file_path)
}

fn write_to_path(history: &HistoryFile, path: &Path) -> Result<PathBuf, HistoryError> {
    // Write to temporary file first
    let temp_path = path.with_extension("json.tmp");

    {
        let file = File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, history)?;
    }

    // Atomic rename
    fs::rename(&temp_path, path)?;

    info!("History written to: {:?}", path);

    Ok(path.to_path_buf())
}
