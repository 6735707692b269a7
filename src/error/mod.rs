mod codes;

pub use codes::ExitCode;

use crate::history::HistoryError;
use crate::listing::ListingError;
use crate::ocr::{ConvertError, OcrError, PipelineError};
use crate::rename::RenameError;
use crate::revert::RevertError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Rename failed: {from} -> {to}")]
    RenameFailed {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("History file error: {message}")]
    History {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Revert failed: {message}")]
    Revert { message: String },

    #[error("Listing failed: {message}")]
    Listing { message: String },

    #[error("OCR error: {message}")]
    Ocr { message: String },

    #[error("PDF conversion error: {message}")]
    Convert { message: String },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::RenameFailed { .. } => ExitCode::RenameError,
            AppError::History { .. } => ExitCode::HistoryError,
            AppError::Revert { .. } => ExitCode::RevertError,
            AppError::Listing { .. } => ExitCode::ListingError,
            AppError::Ocr { .. } => ExitCode::OcrError,
            AppError::Convert { .. } => ExitCode::ConvertError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::RenameFailed { from, to, source } => {
                format!(
                    "Failed to rename file:\n\
                     From: {}\n\
                     To:   {}\n\
                     Error: {}\n\n\
                     Check file permissions and ensure no files are open.",
                    from, to, source
                )
            }

            AppError::History { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "History file error:\n  {}\n{}\n\
                     Ensure the history file exists and is valid JSON.",
                    message, path_info
                )
            }

            AppError::Revert { message } => {
                format!(
                    "Revert failed:\n  {}\n\n\
                     The target files may have been moved or renamed since the batch ran.",
                    message
                )
            }

            AppError::Listing { message } => {
                format!("Failed to write listing:\n  {}", message)
            }

            AppError::Ocr { message } => {
                format!(
                    "OCR preprocessing failed:\n  {}\n\n\
                     Set GOOGLE_VISION_API_KEY (a .env file in the working directory\n\
                     is honored) and check your network connection.",
                    message
                )
            }

            AppError::Convert { message } => {
                format!(
                    "PDF conversion failed:\n  {}\n\n\
                     Ensure poppler-utils (pdftoppm) is installed and the PDF is readable.",
                    message
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<RenameError> for AppError {
    fn from(err: RenameError) -> Self {
        match err {
            RenameError::FilesystemError { from, to, source } => {
                AppError::RenameFailed { from, to, source }
            }
        }
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        AppError::History {
            path: None,
            message: err.to_string(),
        }
    }
}

impl From<RevertError> for AppError {
    fn from(err: RevertError) -> Self {
        match err {
            RevertError::History(e) => AppError::History {
                path: None,
                message: e.to_string(),
            },
            other => AppError::Revert {
                message: other.to_string(),
            },
        }
    }
}

impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Scan(e) => e.into(),
            other => AppError::Listing {
                message: other.to_string(),
            },
        }
    }
}

impl From<OcrError> for AppError {
    fn from(err: OcrError) -> Self {
        AppError::Ocr {
            message: err.to_string(),
        }
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        AppError::Convert {
            message: err.to_string(),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Scan(e) => e.into(),
            PipelineError::Convert(e) => e.into(),
            PipelineError::Detect(e) => e.into(),
            other => AppError::Ocr {
                message: other.to_string(),
            },
        }
    }
}
