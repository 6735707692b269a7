use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::types::*;
use super::writer::HistoryError;

/// Read and parse a history file
pub fn read_history(path: &Path) -> Result<HistoryFile, HistoryError> {
    let file = File::open(path)
        .map_err(|e| HistoryError::ReadError(format!("Cannot open file: {}", e)))?;

    let reader = BufReader::new(file);
    let history: HistoryFile = serde_json::from_reader(reader)
        .map_err(|e| HistoryError::ReadError(format!("Invalid JSON: {}", e)))?;

    // Version check
    if history.version != HISTORY_VERSION {
        return Err(HistoryError::VersionMismatch {
            expected: HISTORY_VERSION.to_string(),
            found: history.version,
        });
    }

    Ok(history)
}
