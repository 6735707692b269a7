mod engine;
mod types;

pub use engine::{rename_receipts, RenameError, RenameOptions};
pub use types::{RenameOperation, RenameResult, SkippedRename};
