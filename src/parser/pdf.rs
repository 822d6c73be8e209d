// file: src/parser/pdf.rs
// description: page-by-page PDF text extraction with lopdf
// reference: https://docs.rs/lopdf

use crate::error::IngestError;
use crate::models::{DocumentFormat, ExtractionReport};
use lopdf::Document as PdfDocument;
use std::fmt::Display;
use tracing::{debug, warn};

pub const PAGE_SEPARATOR: &str = "\n\n";

pub fn extract_text(bytes: &[u8]) -> Result<(String, ExtractionReport), IngestError> {
    let pdf = PdfDocument::load_mem(bytes).map_err(|e| IngestError::CorruptDocument {
        format: DocumentFormat::Pdf,
        message: e.to_string(),
    })?;

    let page_numbers: Vec<u32> = pdf.get_pages().keys().copied().collect();
    debug!("PDF has {} pages", page_numbers.len());

    let pages = page_numbers
        .into_iter()
        .map(|number| (number, pdf.extract_text(&[number])));

    Ok(assemble_pages(pages))
}

/// Join per-page results in page order. A page that failed to extract is
/// logged and contributes an empty string so the rest of the document
/// stays usable.
pub(crate) fn assemble_pages<E, I>(pages: I) -> (String, ExtractionReport)
where
    E: Display,
    I: IntoIterator<Item = (u32, Result<String, E>)>,
{
    let mut report = ExtractionReport::default();
    let mut texts = Vec::new();

    for (number, result) in pages {
        match result {
            Ok(text) => texts.push(text.trim().to_string()),
            Err(e) => {
                warn!("Skipping unreadable PDF page {}: {}", number, e);
                report.skipped_pages.push(number);
                texts.push(String::new());
            }
        }
    }

    let text = texts.join(PAGE_SEPARATOR);
    report.pages = Some(texts.len());
    report.characters = text.chars().count();

    (text, report)
}
