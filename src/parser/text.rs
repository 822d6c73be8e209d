// file: src/parser/text.rs
// description: plain text decoding
// reference: https://doc.rust-lang.org/std/string/struct.FromUtf8Error.html

use crate::error::IngestError;
use crate::models::ExtractionReport;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub fn extract_text(bytes: &[u8]) -> Result<(String, ExtractionReport), IngestError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let text = std::str::from_utf8(body)
        .map_err(|e| IngestError::Decoding {
            offset: e.valid_up_to() + (bytes.len() - body.len()),
            message: e.to_string(),
        })?
        .to_string();

    let report = ExtractionReport {
        characters: text.chars().count(),
        ..ExtractionReport::default()
    };

    Ok((text, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        let (text, report) = extract_text("Cats are mammals.".as_bytes()).unwrap();
        assert_eq!(text, "Cats are mammals.");
        assert_eq!(report.characters, 17);
        assert!(report.pages.is_none());
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("héllo".as_bytes());

        let (text, report) = extract_text(&bytes).unwrap();
        assert_eq!(text, "héllo");
        assert_eq!(report.characters, 5);
    }

    #[test]
    fn test_invalid_utf8_reports_offset() {
        let bytes = [b'o', b'k', 0xFF, b'!'];
        let err = extract_text(&bytes).unwrap_err();

        match err {
            IngestError::Decoding { offset, .. } => assert_eq!(offset, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let (text, report) = extract_text(&[]).unwrap();
        assert!(text.is_empty());
        assert_eq!(report.characters, 0);
    }
}
