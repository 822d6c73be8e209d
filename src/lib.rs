// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod retrieval;
pub mod session;
pub mod utils;

pub use config::{Config, EngineConfig, IngestConfig};
pub use error::{IngestError, IngestStage, QaError, Result};
pub use index::{DocumentIndex, IndexStats, Indexer, Tokenizer};
pub use models::{Answer, Confidence, Document, DocumentFormat, ExtractionReport, Passage, Question};
pub use parser::{Extraction, FormatNormalizer, PassageSegmenter};
pub use pipeline::{IngestSpinner, IngestStats, LoadedDocument, QaEngine};
pub use retrieval::{AnswerSelector, QueryMatcher, ScoredPassage};
pub use session::{SessionId, SessionStatus, SessionStore, StagedUpload};
pub use utils::{OperationTimer, Validator};

/// Build an index for one uploaded document with default settings.
pub fn ingest(bytes: &[u8], filename: &str) -> std::result::Result<DocumentIndex, IngestError> {
    QaEngine::default().ingest(bytes, filename)
}

/// Answer a question against an index with default settings.
pub fn answer(index: &DocumentIndex, question: &str) -> Answer {
    QaEngine::default().answer(index, question)
}
