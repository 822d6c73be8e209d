// file: src/parser/normalizer.rs
// description: converts raw document bytes of a declared format into plain text
// reference: one extraction function per format, chosen by an exhaustive match

use crate::error::IngestError;
use crate::models::{DocumentFormat, ExtractionReport};
use crate::parser::{docx, pdf, text};
use crate::utils::Validator;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub report: ExtractionReport,
}

pub struct FormatNormalizer {
    max_document_chars: usize,
}

impl FormatNormalizer {
    pub fn new() -> Self {
        Self {
            max_document_chars: 0,
        }
    }

    /// Keep at most `max_chars` characters of extracted text; 0 keeps everything.
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_document_chars: max_chars,
        }
    }

    pub fn normalize(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<Extraction, IngestError> {
        Validator::validate_signature(format, bytes)?;

        let (mut text, mut report) = match format {
            DocumentFormat::Pdf => pdf::extract_text(bytes)?,
            DocumentFormat::Docx => docx::extract_text(bytes)?,
            DocumentFormat::Txt => text::extract_text(bytes)?,
        };

        if self.max_document_chars > 0 && report.characters > self.max_document_chars {
            warn!(
                "Document too large ({} chars), truncating to {} chars",
                report.characters, self.max_document_chars
            );
            truncate_chars(&mut text, self.max_document_chars);
            report.characters = self.max_document_chars;
            report.truncated = true;
        }

        debug!(
            "Normalized {} document: {} bytes -> {} chars",
            format,
            bytes.len(),
            report.characters
        );

        Ok(Extraction { text, report })
    }
}

impl Default for FormatNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_chars(text: &mut String, max_chars: usize) {
    if let Some((byte_index, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_index);
    }
}
