// file: src/utils/validation.rs
// description: upload validation utilities and helpers
// reference: input validation patterns

use crate::error::IngestError;
use crate::models::DocumentFormat;

const PDF_SIGNATURE: &[u8] = b"%PDF";
const ZIP_SIGNATURE: &[u8] = b"PK";

pub struct Validator;

impl Validator {
    /// Resolve the declared format from the upload's filename. Runs before
    /// any bytes are parsed.
    pub fn validate_filename(filename: &str) -> Result<DocumentFormat, IngestError> {
        let name = Self::sanitize_filename(filename);
        if name.is_empty() {
            return Err(IngestError::UnsupportedFormat("(no filename)".to_string()));
        }
        DocumentFormat::from_filename(&name)
    }

    pub fn validate_upload_size(size: u64, limit: u64) -> Result<(), IngestError> {
        if limit > 0 && size > limit {
            return Err(IngestError::FileTooLarge { size, limit });
        }
        Ok(())
    }

    /// Cheap container sniffing so a renamed file fails fast with a clear
    /// error instead of deep inside a parser.
    pub fn validate_signature(format: DocumentFormat, bytes: &[u8]) -> Result<(), IngestError> {
        let expected = match format {
            DocumentFormat::Pdf => PDF_SIGNATURE,
            DocumentFormat::Docx => ZIP_SIGNATURE,
            DocumentFormat::Txt => return Ok(()),
        };

        // PDF allows leading junk before the header; tolerate a short prefix.
        let window = match format {
            DocumentFormat::Pdf => &bytes[..bytes.len().min(1024)],
            _ => &bytes[..bytes.len().min(expected.len())],
        };

        if window.windows(expected.len()).any(|w| w == expected) {
            Ok(())
        } else {
            Err(IngestError::CorruptDocument {
                format,
                message: format!("missing {} signature", format),
            })
        }
    }

    /// Keep only the final path component of a client-supplied filename.
    pub fn sanitize_filename(filename: &str) -> String {
        filename
            .replace('\\', "/")
            .rsplit('/')
            .next()
            .unwrap_or("")
            .trim()
            .to_string()
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let cut: String = text.chars().take(max_chars).collect();
            format!("{}...", cut)
        }
    }
}
