// file: src/models/document.rs
// description: uploaded document model, declared formats and extraction report
// reference: internal data structures

use crate::error::IngestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Closed set of formats the engine can normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 3] = ["pdf", "docx", "txt"];

    /// Map a filename's extension (case-insensitive) to a declared format.
    pub fn from_filename(filename: &str) -> Result<Self, IngestError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| IngestError::UnsupportedFormat(filename.to_string()))?;

        extension.parse()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Txt => "text/plain",
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(IngestError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

/// What the normalizer managed to pull out of the container. Best-effort
/// skips are recorded here as well as logged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub pages: Option<usize>,
    pub skipped_pages: Vec<u32>,
    pub paragraphs: Option<usize>,
    pub skipped_tables: usize,
    /// Other container elements whose text is not indexed (tracked deletions,
    /// tables of contents, unreadable sections).
    pub skipped_elements: usize,
    pub characters: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub format: DocumentFormat,
    #[serde(skip)]
    pub raw_bytes: Vec<u8>,
    pub extracted_text: String,
    pub report: ExtractionReport,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        filename: String,
        format: DocumentFormat,
        raw_bytes: Vec<u8>,
        extracted_text: String,
        report: ExtractionReport,
    ) -> Self {
        let id = Self::compute_id(&raw_bytes);

        Self {
            id,
            filename,
            format,
            raw_bytes,
            extracted_text,
            report,
            uploaded_at: Utc::now(),
        }
    }

    pub fn compute_id(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    pub fn size(&self) -> usize {
        self.raw_bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(
            DocumentFormat::from_filename("report.pdf").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_filename("Notes.DOCX").unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_filename("readme.Txt").unwrap(),
            DocumentFormat::Txt
        );
    }

    #[test]
    fn test_unsupported_extensions_rejected() {
        assert!(matches!(
            DocumentFormat::from_filename("archive.xyz"),
            Err(IngestError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentFormat::from_filename("legacy.doc"),
            Err(IngestError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentFormat::from_filename("no_extension"),
            Err(IngestError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_declared_format_parsing() {
        assert_eq!("pdf".parse::<DocumentFormat>().unwrap(), DocumentFormat::Pdf);
        assert_eq!(".TXT".parse::<DocumentFormat>().unwrap(), DocumentFormat::Txt);
        assert!("rtf".parse::<DocumentFormat>().is_err());
    }

    #[test]
    fn test_document_id_is_content_hash() {
        let a = Document::new(
            "a.txt".to_string(),
            DocumentFormat::Txt,
            b"same bytes".to_vec(),
            "same bytes".to_string(),
            ExtractionReport::default(),
        );
        let b = Document::new(
            "b.txt".to_string(),
            DocumentFormat::Txt,
            b"same bytes".to_vec(),
            "same bytes".to_string(),
            ExtractionReport::default(),
        );

        assert_eq!(a.id, b.id);
        assert_eq!(a.id.len(), 64);
        assert_eq!(a.size(), 10);
    }
}
