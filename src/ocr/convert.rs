use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

const RASTER_DPI: &str = "150";

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("pdftoppm not found on PATH; install poppler-utils")]
    RasterizerMissing,

    #[error("pdftoppm failed for {path} (exit code {code:?})")]
    RasterizerFailed { path: PathBuf, code: Option<i32> },

    #[error("pdftoppm produced no pages for {0}")]
    NoPages(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rasterize a PDF into one PNG per page under `output_dir`.
///
/// Pages are renamed from pdftoppm's `<stem>-N.png` scheme to
/// `<stem>_page_N.png` and returned in page order.
pub fn pdf_to_images(pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    fs::create_dir_all(output_dir)?;

    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let prefix = output_dir.join(&stem);

    debug!(pdf = ?pdf_path, out = ?output_dir, "Rasterizing PDF");

    let status = Command::new("pdftoppm")
        .arg("-png")
        .arg("-r")
        .arg(RASTER_DPI)
        .arg(pdf_path)
        .arg(&prefix)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConvertError::RasterizerMissing
            } else {
                ConvertError::Io(e)
            }
        })?;

    if !status.success() {
        return Err(ConvertError::RasterizerFailed {
            path: pdf_path.to_path_buf(),
            code: status.code(),
        });
    }

    let pages = collect_pages(output_dir, &stem)?;

    if pages.is_empty() {
        return Err(ConvertError::NoPages(pdf_path.to_path_buf()));
    }

    info!(pdf = ?pdf_path, pages = pages.len(), "Rasterized");

    Ok(pages)
}

fn collect_pages(output_dir: &Path, stem: &str) -> Result<Vec<PathBuf>, ConvertError> {
    let raw_prefix = format!("{}-", stem);
    let mut raw_pages: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();

        if name.starts_with(&raw_prefix) && name.ends_with(".png") {
            raw_pages.push(entry.path());
        }
    }

    // pdftoppm zero-pads page numbers, so lexicographic order is page order
    raw_pages.sort();

    let mut pages = Vec::with_capacity(raw_pages.len());
    for (i, raw) in raw_pages.iter().enumerate() {
        let page_path = output_dir.join(format!("{}_page_{}.png", stem, i + 1));
        fs::rename(raw, &page_path)?;
        pages.push(page_path);
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_pages_renames_in_order() {
        let dir = tempdir().unwrap();
        let stem = "Bank of Cleveland $526.00";

        fs::write(dir.path().join(format!("{}-2.png", stem)), "b").unwrap();
        fs::write(dir.path().join(format!("{}-1.png", stem)), "a").unwrap();
        fs::write(dir.path().join("unrelated.png"), "x").unwrap();

        let pages = collect_pages(dir.path(), stem).unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages[0].ends_with(format!("{}_page_1.png", stem)));
        assert!(pages[1].ends_with(format!("{}_page_2.png", stem)));

        assert_eq!(fs::read_to_string(&pages[0]).unwrap(), "a");
        assert_eq!(fs::read_to_string(&pages[1]).unwrap(), "b");

        // Raw pdftoppm names are gone
        assert!(!dir.path().join(format!("{}-1.png", stem)).exists());
    }

    #[test]
    fn test_collect_pages_empty() {
        let dir = tempdir().unwrap();
        let pages = collect_pages(dir.path(), "missing").unwrap();
        assert!(pages.is_empty());
    }
}
