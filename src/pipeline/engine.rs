// file: src/pipeline/engine.rs
// description: ingest and answer operations exposed to the host
// reference: normalize -> segment -> index once per upload, match -> select per question

use crate::config::Config;
use crate::error::IngestError;
use crate::index::{DocumentIndex, Indexer, Tokenizer};
use crate::models::{Answer, Document};
use crate::parser::{FormatNormalizer, PassageSegmenter};
use crate::pipeline::progress::IngestStats;
use crate::retrieval::{AnswerSelector, QueryMatcher};
use crate::utils::{OperationTimer, Validator};
use std::time::Duration;
use tracing::{debug, info};

const SLOW_EXTRACTION: Duration = Duration::from_secs(5);

/// A fully built document and its index. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    pub index: DocumentIndex,
    pub stats: IngestStats,
}

pub struct QaEngine {
    normalizer: FormatNormalizer,
    segmenter: PassageSegmenter,
    indexer: Indexer,
    matcher: QueryMatcher,
    selector: AnswerSelector,
    max_upload_bytes: u64,
}

impl QaEngine {
    pub fn new(config: &Config) -> Self {
        let tokenizer = Tokenizer::new(config.engine.min_token_len);

        Self {
            normalizer: FormatNormalizer::with_max_chars(config.ingest.max_document_chars),
            segmenter: PassageSegmenter::new(),
            indexer: Indexer::new(tokenizer.clone()),
            matcher: QueryMatcher::new(tokenizer),
            selector: AnswerSelector::from_config(&config.engine),
            max_upload_bytes: config.ingest.max_upload_bytes(),
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Normalize, segment and index in one step. Nothing is returned unless
    /// every stage succeeded.
    pub fn load(&self, bytes: &[u8], filename: &str) -> Result<LoadedDocument, IngestError> {
        let filename = Validator::sanitize_filename(filename);
        let format = Validator::validate_filename(&filename)?;
        Validator::validate_upload_size(bytes.len() as u64, self.max_upload_bytes)?;

        let timer = OperationTimer::new(&format!("ingest {}", filename));

        let extraction = self.normalizer.normalize(bytes, format)?;
        timer.checkpoint("text extracted");
        timer.warn_if_slow(SLOW_EXTRACTION, "text extraction");

        let passages = self.segmenter.segment(&extraction.text);
        timer.checkpoint("passages segmented");

        let document = Document::new(
            filename,
            format,
            bytes.to_vec(),
            extraction.text,
            extraction.report,
        );
        let index = self.indexer.build(&document.id, passages);

        if index.is_empty() {
            info!(
                "Document {} has no text passages; every question will report no match",
                document.filename
            );
        }

        let duration = timer.finish_with_count(index.len(), "passages");
        let stats = IngestStats::new(
            bytes.len() as u64,
            &document.report,
            index.stats(),
            duration,
        );

        Ok(LoadedDocument {
            document,
            index,
            stats,
        })
    }

    pub fn ingest(&self, bytes: &[u8], filename: &str) -> Result<DocumentIndex, IngestError> {
        self.load(bytes, filename).map(|loaded| loaded.index)
    }

    /// Never fails; "nothing found" is an answer with confidence `none`.
    pub fn answer(&self, index: &DocumentIndex, question: &str) -> Answer {
        let question = self.matcher.question(question);
        let ranked = self.matcher.score(index, &question);
        let answer = self.selector.select(&ranked, index.passages());

        debug!(
            "Answered {:?}: confidence {}, score {:.4}, passages {:?}",
            Validator::truncate_text(&question.raw_text, 80),
            answer.confidence,
            answer.score,
            answer.passage_indices()
        );

        answer
    }
}

impl Default for QaEngine {
    fn default() -> Self {
        Self::new(&Config::default_config())
    }
}
