use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::history::{
    read_history, HistoryEntry, HistoryError, HistoryFile, OperationType, HISTORY_VERSION,
};
use crate::progress::Progress;

#[derive(Debug, thiserror::Error)]
pub enum RevertError {
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Target directory no longer exists: {0}")]
    TargetMissing(PathBuf),

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    RenameError {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write revert history: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize revert history: {0}")]
    SerializeError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct RevertOptions {
    pub dry_run: bool,
}

/// A single revert operation
#[derive(Debug, Clone)]
pub struct RevertOperation {
    pub current_path: PathBuf,
    pub current_name: String,
    pub revert_path: PathBuf,
    pub revert_name: String,
}

/// Result of a revert operation
#[derive(Debug)]
pub struct RevertResult {
    pub operations: Vec<RevertOperation>,
    /// Entries that could not be reverted, with the reason
    pub skipped: Vec<String>,
    pub original_history: PathBuf,
    pub dry_run: bool,
    pub revert_history_path: Option<PathBuf>,
}

/// Undo a recorded rename batch, last write first.
///
/// Entries whose renamed file is missing, or whose original name is now
/// occupied, are reported and skipped; the rest of the batch proceeds.
pub fn revert_from_history(
    history_path: &Path,
    options: &RevertOptions,
    progress: &mut Progress,
) -> Result<RevertResult, RevertError> {
    info!("Loading history from: {:?}", history_path);

    let history = read_history(history_path)?;

    info!(
        "History contains {} changes from {}",
        history.changes.len(),
        history.executed_at
    );

    let target_dir = &history.target_directory;
    if !target_dir.exists() {
        return Err(RevertError::TargetMissing(target_dir.clone()));
    }

    progress.revert_start(history.changes.len(), &history.executed_at.to_string());

    let (operations, skipped) = prepare_revert_operations(&history, target_dir, progress);

    let mut revert_history_path = None;

    if !options.dry_run {
        execute_reverts(&operations, progress)?;

        if !operations.is_empty() {
            let revert_time = Utc::now();
            let revert_history = create_revert_history(&history, &operations, &revert_time);
            let filename = history.generate_revert_filename(&revert_time);
            let revert_path = target_dir.join(&filename);

            write_revert_history(&revert_history, &revert_path)?;
            progress.history_written(&revert_path);

            info!("Revert history saved to: {:?}", revert_path);
            revert_history_path = Some(revert_path);
        }
    }

    progress.revert_complete(operations.len(), skipped.len(), options.dry_run);

    Ok(RevertResult {
        operations,
        skipped,
        original_history: history_path.to_path_buf(),
        dry_run: options.dry_run,
        revert_history_path,
    })
}

fn prepare_revert_operations(
    history: &HistoryFile,
    target_dir: &Path,
    progress: &mut Progress,
) -> (Vec<RevertOperation>, Vec<String>) {
    let mut operations = Vec::with_capacity(history.changes.len());
    let mut skipped = Vec::new();

    // Undo in reverse of execution order
    for entry in history.changes.iter().rev() {
        let current_path = target_dir.join(&entry.destination);
        let revert_path = target_dir.join(&entry.source);

        debug!("Checking revert: {} -> {}", entry.destination, entry.source);

        if !current_path.exists() {
            let reason = format!(
                "File not found: '{}' (expected from previous rename)",
                entry.destination
            );
            warn!("{}", reason);
            progress.warn(&reason);
            skipped.push(reason);
            continue;
        }

        if revert_path.exists() {
            let reason = format!("Cannot revert: '{}' already exists", entry.source);
            warn!("{}", reason);
            progress.warn(&reason);
            skipped.push(reason);
            continue;
        }

        operations.push(RevertOperation {
            current_path,
            current_name: entry.destination.clone(),
            revert_path,
            revert_name: entry.source.clone(),
        });
    }

    (operations, skipped)
}

fn execute_reverts(
    operations: &[RevertOperation],
    progress: &mut Progress,
) -> Result<(), RevertError> {
    let total = operations.len();

    for (i, op) in operations.iter().enumerate() {
        progress.revert_progress(i + 1, total, &op.current_name, &op.revert_name);

        info!("Reverting: {} -> {}", op.current_name, op.revert_name);

        fs::rename(&op.current_path, &op.revert_path).map_err(|e| RevertError::RenameError {
            from: op.current_name.clone(),
            to: op.revert_name.clone(),
            source: e,
        })?;
    }

    Ok(())
}

fn create_revert_history(
    original: &HistoryFile,
    operations: &[RevertOperation],
    revert_time: &chrono::DateTime<Utc>,
) -> HistoryFile {
    let changes: Vec<HistoryEntry> = operations
        .iter()
        .map(|op| HistoryEntry {
            source: op.current_name.clone(),
            destination: op.revert_name.clone(),
        })
        .collect();

    HistoryFile {
        version: HISTORY_VERSION.to_string(),
        executed_at: *revert_time,
        operation: OperationType::Revert,
        target_directory: original.target_directory.clone(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        changes,
    }
}

fn write_revert_history(history: &HistoryFile, path: &Path) -> Result<(), RevertError> {
    let temp_path = path.with_extension("json.tmp");

    {
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, history)?;
    }

    fs::rename(&temp_path, path)?;

    Ok(())
}
