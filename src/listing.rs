use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::scanner::{scan_files, ScannerError};

#[derive(Error, Debug)]
pub enum ListingError {
    #[error(transparent)]
    Scan(#[from] ScannerError),

    #[error("Failed to write listing: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the relative path of every file under `target` to `output`, one per
/// line, sorted. Returns the number of files listed.
pub fn write_listing(target: &Path, output: &Path) -> Result<usize, ListingError> {
    let entries = scan_files(target)?;

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);

    for entry in &entries {
        let relative = entry.path.strip_prefix(target).unwrap_or(&entry.path);
        writeln!(writer, "{}", relative.display())?;
    }

    writer.flush()?;

    info!(
        count = entries.len(),
        output = ?output,
        "Listing written"
    );

    Ok(entries.len())
}
