// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use crate::models::DocumentFormat;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QaError>;

/// Failures that abort a single upload. None of these are retried; the host
/// shows `user_message()` and the user re-uploads.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt {format} document: {message}")]
    CorruptDocument {
        format: DocumentFormat,
        message: String,
    },

    #[error("Text decoding failed at byte {offset}: {message}")]
    Decoding { offset: usize, message: String },

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Upload staging failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Stage of the ingestion pipeline an [`IngestError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Upload,
    FormatDetection,
    Extraction,
    Decoding,
}

impl IngestError {
    pub fn stage(&self) -> IngestStage {
        match self {
            IngestError::UnsupportedFormat(_) => IngestStage::FormatDetection,
            IngestError::CorruptDocument { .. } => IngestStage::Extraction,
            IngestError::Decoding { .. } => IngestStage::Decoding,
            IngestError::FileTooLarge { .. } | IngestError::Io(_) => IngestStage::Upload,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            IngestError::UnsupportedFormat(_) => format!(
                "Unsupported file type. Please upload a {} file.",
                supported_extensions_list()
            ),
            IngestError::CorruptDocument { format, .. } => format!(
                "The {} file could not be opened. It may be damaged or not a real {} file.",
                format, format
            ),
            IngestError::Decoding { .. } => {
                "The text file is not valid UTF-8. Please save it as UTF-8 and try again."
                    .to_string()
            }
            IngestError::FileTooLarge { limit, .. } => format!(
                "The file is too large. The maximum upload size is {} MB.",
                limit / 1_048_576
            ),
            IngestError::Io(_) => "The upload could not be stored. Please try again.".to_string(),
        }
    }
}

/// ".pdf, .docx or .txt"
fn supported_extensions_list() -> String {
    let extensions: Vec<String> = DocumentFormat::SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect();

    match extensions.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

#[derive(Error, Debug)]
pub enum QaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ingestion failed: {0}")]
    Ingest(#[from] IngestError),

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Ingestion timed out after {:.1}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
