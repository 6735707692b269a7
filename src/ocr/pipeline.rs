use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::normalizer::tokenize;
use crate::progress::Progress;
use crate::scanner::{scan_files, ScannerError};

use super::client::TextDetector;
use super::convert::{pdf_to_images, ConvertError};
use super::types::{OcrError, PageRecord};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScannerError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Detect(#[from] OcrError),

    #[error("Failed to read page image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write OCR artifact: {0}")]
    ArtifactWrite(#[from] std::io::Error),

    #[error("Failed to serialize OCR artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Output trees mirror the input tree: the `PDF Receipts` path component maps
/// to `Image Receipts` for page images and `OCR Outputs` for JSON artifacts.
/// When the component is absent, outputs land beside the PDF.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub pdf_component: String,
    pub image_component: String,
    pub results_component: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            pdf_component: "PDF Receipts".to_string(),
            image_component: "Image Receipts".to_string(),
            results_component: "OCR Outputs".to_string(),
        }
    }
}

impl OutputLayout {
    fn map_dir(&self, pdf_path: &Path, replacement: &str) -> PathBuf {
        let parent = pdf_path.parent().unwrap_or_else(|| Path::new(""));
        let pdf_component = std::ffi::OsStr::new(&self.pdf_component);

        let mut mapped = PathBuf::new();
        let mut replaced = false;

        for component in parent.components() {
            if !replaced && component.as_os_str() == pdf_component {
                mapped.push(replacement);
                replaced = true;
            } else {
                mapped.push(component);
            }
        }

        mapped
    }

    pub fn image_dir(&self, pdf_path: &Path) -> PathBuf {
        self.map_dir(pdf_path, &self.image_component)
    }

    pub fn artifact_path(&self, pdf_path: &Path) -> PathBuf {
        let stem = pdf_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        self.map_dir(pdf_path, &self.results_component)
            .join(format!("{}_ocr_data.json", stem))
    }
}

/// Outcome of processing one receipt
#[derive(Debug)]
pub struct ProcessOutcome {
    pub pdf_path: PathBuf,
    pub artifact_path: PathBuf,
    pub skipped: bool,
    pub pages: usize,
}

/// Summary of an OCR batch
#[derive(Debug, Default)]
pub struct OcrSummary {
    pub processed: usize,
    pub skipped: usize,
    pub artifacts: Vec<PathBuf>,
}

/// Batch OCR preprocessing: rasterize each receipt PDF, run every page
/// through the text detector, and cache the annotated result as JSON.
pub struct OcrPipeline {
    detector: Box<dyn TextDetector>,
    layout: OutputLayout,
}

impl OcrPipeline {
    pub fn new(detector: Box<dyn TextDetector>, layout: OutputLayout) -> Self {
        Self { detector, layout }
    }

    /// Process every PDF under `root`
    pub fn process_all(
        &self,
        root: &Path,
        progress: &mut Progress,
    ) -> Result<OcrSummary, PipelineError> {
        let pdfs: Vec<_> = scan_files(root)?
            .into_iter()
            .filter(|entry| {
                entry
                    .path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
            })
            .collect();

        let total = pdfs.len();
        progress.ocr_start(total);

        info!("Found {} PDF receipts", total);

        let mut summary = OcrSummary::default();

        for (i, entry) in pdfs.iter().enumerate() {
            let outcome = self.process_receipt(&entry.path)?;

            progress.ocr_progress(i + 1, total, &entry.name, outcome.skipped);

            if outcome.skipped {
                summary.skipped += 1;
            } else {
                summary.processed += 1;
            }
            summary.artifacts.push(outcome.artifact_path);
        }

        progress.ocr_complete(summary.processed, summary.skipped);

        Ok(summary)
    }

    /// Process a single receipt PDF; a receipt whose artifact already exists
    /// is skipped before any conversion or API call.
    pub fn process_receipt(&self, pdf_path: &Path) -> Result<ProcessOutcome, PipelineError> {
        let artifact_path = self.layout.artifact_path(pdf_path);

        if artifact_path.exists() {
            debug!(artifact = ?artifact_path, "Artifact exists, skipping");
            return Ok(ProcessOutcome {
                pdf_path: pdf_path.to_path_buf(),
                artifact_path,
                skipped: true,
                pages: 0,
            });
        }

        let filename = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let (payee, amount) = receipt_fields(&filename);

        if payee.is_none() {
            warn!(file = %filename, "Payee and amount not found in filename");
        }

        let image_dir = self.layout.image_dir(pdf_path);
        let pages = pdf_to_images(pdf_path, &image_dir)?;

        let mut records = Vec::with_capacity(pages.len());
        for page in &pages {
            let bytes = fs::read(page).map_err(|e| PipelineError::ImageRead {
                path: page.clone(),
                source: e,
            })?;

            let ocr_data = self.detector.detect_text(&bytes)?;

            records.push(PageRecord {
                payee: payee.clone(),
                amount: amount.clone(),
                image_path: page.clone(),
                ocr_data,
            });
        }

        write_artifact(&artifact_path, &records)?;

        info!(pdf = ?pdf_path, artifact = ?artifact_path, "Receipt processed");

        Ok(ProcessOutcome {
            pdf_path: pdf_path.to_path_buf(),
            artifact_path,
            skipped: false,
            pages: records.len(),
        })
    }
}

/// Extract payee and amount from a (canonical) receipt filename.
///
/// Both are absent when the name does not parse or has no title; the amount
/// is reported without its currency marker.
pub fn receipt_fields(filename: &str) -> (Option<String>, Option<String>) {
    match tokenize(filename) {
        Ok(tokens) if !tokens.title.is_empty() => {
            let amount = tokens.amount.replace('$', "");
            (Some(tokens.title), Some(amount))
        }
        _ => (None, None),
    }
}

fn write_artifact(path: &Path, records: &[PageRecord]) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write to temporary file first
    let temp_path = path.with_extension("json.tmp");

    {
        let file = File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, records)?;
    }

    // Atomic rename
    fs::rename(&temp_path, path)?;

    Ok(())
}
