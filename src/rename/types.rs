use std::path::PathBuf;

/// A single rename operation
#[derive(Debug, Clone)]
pub struct RenameOperation {
    /// Full path to the source file
    pub source_path: PathBuf,
    /// Original file name
    pub source_name: String,
    /// Full path to the destination
    pub destination_path: PathBuf,
    /// Canonical file name
    pub destination_name: String,
}

impl RenameOperation {
    pub fn new(source_path: PathBuf, destination_name: String) -> Self {
        let source_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let destination_path = source_path
            .parent()
            .map(|p| p.join(&destination_name))
            .unwrap_or_else(|| PathBuf::from(&destination_name));

        Self {
            source_path,
            source_name,
            destination_path,
            destination_name,
        }
    }
}

/// A rename that was skipped because the destination already exists
#[derive(Debug, Clone)]
pub struct SkippedRename {
    pub source_name: String,
    pub destination_name: String,
}

/// Result of a rename batch
#[derive(Debug, Clone)]
pub struct RenameResult {
    /// Operations performed (or planned, under dry run)
    pub operations: Vec<RenameOperation>,
    /// Collisions skipped instead of overwritten
    pub skipped: Vec<SkippedRename>,
    /// Files whose name was already canonical
    pub unchanged: usize,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl RenameResult {
    pub fn new(dry_run: bool) -> Self {
        Self {
            operations: Vec::new(),
            skipped: Vec::new(),
            unchanged: 0,
            dry_run,
        }
    }

    pub fn add_operation(&mut self, op: RenameOperation) {
        self.operations.push(op);
    }

    pub fn add_skip(&mut self, skip: SkippedRename) {
        self.skipped.push(skip);
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }
}
