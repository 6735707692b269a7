use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const HISTORY_VERSION: &str = "1.0";

/// Filename prefix shared by all history files; the scanner uses it to keep
/// them out of rename batches.
pub const HISTORY_FILE_PREFIX: &str = "receiptfix-history-";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFile {
    /// Schema version for compatibility
    pub version: String,

    /// When the operation was executed
    pub executed_at: DateTime<Utc>,

    /// Type of operation performed
    pub operation: OperationType,

    /// Target directory path
    pub target_directory: PathBuf,

    /// Tool version that created this history
    pub tool_version: String,

    /// All changes made, in execution order
    pub changes: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Rename,
    Revert,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Original path, relative to the target directory
    pub source: String,

    /// New path, relative to the target directory
    pub destination: String,
}

impl HistoryFile {
    /// Generate the filename for this history file
    pub fn generate_filename(&self) -> String {
        let timestamp = self.executed_at.format("%Y%m%d-%H%M%S");
        format!("{}{}.json", HISTORY_FILE_PREFIX, timestamp)
    }

    /// Generate the filename for the revert record of this history
    pub fn generate_revert_filename(&self, revert_time: &DateTime<Utc>) -> String {
        let timestamp = revert_time.format("%Y%m%d-%H%M%S");
        format!("{}revert-{}.json", HISTORY_FILE_PREFIX, timestamp)
    }
}
