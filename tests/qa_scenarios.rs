// file: tests/qa_scenarios.rs
// description: end-to-end question answering scenarios through the public api
// reference: ingest -> answer against txt, docx and malformed uploads

use docqa::{
    Confidence, Config, IngestError, IngestStage, PassageSegmenter, QaEngine, QaError,
    SessionStore,
};
use docqa::parser::segmenter::collapse_whitespace;
use docx_rs::{Delete, Docx, Insert, Paragraph, Run};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

fn texts(engine: &QaEngine, bytes: &[u8], filename: &str) -> Vec<String> {
    engine
        .ingest(bytes, filename)
        .unwrap()
        .passages()
        .iter()
        .map(|p| p.text.clone())
        .collect()
}

#[test]
fn test_reingest_identical_bytes_is_identical() {
    let engine = QaEngine::default();
    let bytes = docx_bytes(&[
        "Warranty covers parts for two years.",
        "Labor is covered for ninety days. Shipping is extra!",
    ]);

    let first = engine.ingest(&bytes, "warranty.docx").unwrap();
    let second = engine.ingest(&bytes, "warranty.docx").unwrap();

    assert_eq!(first, second);
    assert_eq!(first.stats(), second.stats());
}

#[test]
fn test_passages_partition_extracted_text() {
    let engine = QaEngine::default();
    let text = "  Intro line without stop\n\nFirst point. Second point?  Third!\n \n\tLast.";
    let loaded = engine.load(text.as_bytes(), "notes.txt").unwrap();
    let extracted = &loaded.document.extracted_text;

    let mut cursor = 0;
    for (i, passage) in loaded.index.passages().iter().enumerate() {
        assert_eq!(passage.index, i);
        assert!(!passage.text.trim().is_empty());
        assert!(passage.span.start >= cursor);
        assert!(extracted[cursor..passage.span.start].trim().is_empty());
        assert_eq!(collapse_whitespace(&extracted[passage.span.clone()]), passage.text);
        cursor = passage.span.end;
    }
    assert!(extracted[cursor..].trim().is_empty());
    assert_eq!(loaded.index.len(), 5);
}

#[test]
fn test_tracked_changes_answer_from_accepted_text() {
    let paragraph = Paragraph::new()
        .add_run(Run::new().add_text("The lease runs for "))
        .add_insert(Insert::new(Run::new().add_text("fourteen")))
        .add_delete(Delete::new().add_run(Run::new().add_delete_text("twelve")))
        .add_run(Run::new().add_text(" months."));
    let mut cursor = Cursor::new(Vec::new());
    Docx::new()
        .add_paragraph(paragraph)
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Pets are not allowed.")))
        .build()
        .pack(&mut cursor)
        .unwrap();

    let engine = QaEngine::default();
    let loaded = engine.load(&cursor.into_inner(), "lease.docx").unwrap();
    assert!(!loaded.document.extracted_text.contains("twelve"));
    assert_eq!(loaded.document.report.skipped_elements, 1);

    let answer = engine.answer(&loaded.index, "fourteen months");
    assert_eq!(answer.confidence, Confidence::High);
    assert_eq!(answer.text, "The lease runs for fourteen months.");
}

#[test]
fn test_unique_terms_select_single_passage_high() {
    let engine = QaEngine::default();
    let index = engine
        .ingest(
            b"Reset the router by holding the button. Call support for billing questions.",
            "help.txt",
        )
        .unwrap();

    let answer = engine.answer(&index, "billing support");
    assert_eq!(answer.confidence, Confidence::High);
    assert_eq!(answer.passage_indices(), vec![1]);
    assert_eq!(answer.text, "Call support for billing questions.");
}

#[test]
fn test_stop_word_question_has_no_answer() {
    let engine = QaEngine::default();
    let index = engine
        .ingest(b"The cat and a dog share the house.", "pets.txt")
        .unwrap();

    let answer = engine.answer(&index, "the and a");
    assert_eq!(answer.confidence, Confidence::None);
    assert!(answer.passages.is_empty());
    assert_eq!(answer.render(), docqa::models::NO_MATCH_MESSAGE);
}

#[test]
fn test_empty_text_file() {
    let engine = QaEngine::default();
    let index = engine.ingest(b"", "empty.txt").unwrap();

    assert_eq!(index.len(), 0);
    let answer = engine.answer(&index, "Is anything here?");
    assert_eq!(answer.confidence, Confidence::None);
}

#[test]
fn test_sentence_split_of_plain_text() {
    let engine = QaEngine::default();
    assert_eq!(
        texts(&engine, b"Cats are mammals. Dogs are mammals too.", "animals.txt"),
        vec!["Cats are mammals.", "Dogs are mammals too."]
    );

    let segmenter = PassageSegmenter::new();
    let passages = segmenter.segment("Cats are mammals. Dogs are mammals too.");
    assert_eq!(passages[1].span, 18..39);
}

#[test]
fn test_grass_question() {
    let index = docqa::ingest(b"The sky is blue. The grass is green.", "colors.txt").unwrap();
    let answer = docqa::answer(&index, "What color is the grass?");

    assert_eq!(answer.confidence, Confidence::High);
    assert_eq!(answer.text, "The grass is green.");
}

#[test]
fn test_unsupported_extension() {
    let err = docqa::ingest(b"%PDF-1.7 looks like pdf", "report.xyz").unwrap_err();

    assert!(matches!(err, IngestError::UnsupportedFormat(_)));
    assert_eq!(err.stage(), IngestStage::FormatDetection);
    assert!(err.user_message().contains(".pdf"));
}

#[test]
fn test_corrupt_containers() {
    let engine = QaEngine::default();

    let err = engine.ingest(b"%PDF-1.4 truncated", "broken.pdf").unwrap_err();
    assert!(matches!(err, IngestError::CorruptDocument { .. }));
    assert_eq!(err.stage(), IngestStage::Extraction);

    let err = engine.ingest(b"plain words", "renamed.docx").unwrap_err();
    assert!(matches!(err, IngestError::CorruptDocument { .. }));
}

#[test]
fn test_invalid_utf8_text() {
    let err = docqa::ingest(b"ok so far \xFF\xFE", "latin.txt").unwrap_err();
    assert!(matches!(err, IngestError::Decoding { offset: 10, .. }));
}

#[test]
fn test_docx_paragraphs_answer() {
    let engine = QaEngine::default();
    let bytes = docx_bytes(&[
        "Meeting notes",
        "The budget was approved by the board.",
        "Next meeting is on Friday.",
    ]);

    let index = engine.ingest(&bytes, "NOTES.DOCX").unwrap();
    let answer = engine.answer(&index, "Who approved the budget?");

    assert_eq!(answer.confidence, Confidence::High);
    assert_eq!(answer.text, "The budget was approved by the board.");
}

#[test]
fn test_low_confidence_returns_context_in_document_order() {
    let engine = QaEngine::default();
    let index = engine
        .ingest(
            b"Parking is free. Coffee is free on Mondays. Desks are assigned. Snacks are free.",
            "office.txt",
        )
        .unwrap();

    let answer = engine.answer(&index, "free");
    assert_eq!(answer.confidence, Confidence::Low);
    assert_eq!(answer.passage_indices(), vec![0, 1, 3]);
    assert_eq!(
        answer.text,
        "Parking is free. Coffee is free on Mondays. Snacks are free."
    );
}

#[test]
fn test_session_replacement_flow() {
    let store = SessionStore::new(&Config::default_config());
    let session = store.create();

    store
        .upload(&session, b"Version one mentions apples.", "v1.txt")
        .unwrap();
    let before = store.ask(&session, "apples").unwrap();
    assert_eq!(before.confidence, Confidence::High);

    let err = store.upload(&session, b"junk", "v2.bin").unwrap_err();
    assert!(matches!(
        err,
        QaError::Ingest(IngestError::UnsupportedFormat(_))
    ));
    assert_eq!(
        store.ask(&session, "apples").unwrap().text,
        "Version one mentions apples."
    );

    store
        .upload(&session, b"Version two mentions pears.", "v2.txt")
        .unwrap();
    assert_eq!(
        store.ask(&session, "apples").unwrap().confidence,
        Confidence::None
    );

    assert!(store.end(&session));
    assert!(store.is_empty());
}
