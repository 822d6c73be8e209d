// file: src/index/indexer.rs
// description: per-document term frequency and inverted index construction
// reference: ordered maps keep builds deterministic for identical input

use crate::index::tokenizer::Tokenizer;
use crate::models::Passage;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Read-only retrieval structure for one document. Replaced wholesale when a
/// new document arrives; never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentIndex {
    document_id: String,
    passages: Vec<Passage>,
    postings: BTreeMap<String, BTreeSet<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub passages: usize,
    pub vocabulary: usize,
    pub term_occurrences: usize,
}

impl DocumentIndex {
    pub fn empty(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            passages: Vec::new(),
            postings: BTreeMap::new(),
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn passage(&self, index: usize) -> Option<&Passage> {
        self.passages.get(index)
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Passages containing `term`, ascending.
    pub fn postings(&self, term: &str) -> Option<&BTreeSet<usize>> {
        self.postings.get(term)
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, BTreeSet::len)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            passages: self.passages.len(),
            vocabulary: self.postings.len(),
            term_occurrences: self
                .passages
                .iter()
                .map(|p| p.term_frequency.values().sum::<usize>())
                .sum(),
        }
    }
}

pub struct Indexer {
    tokenizer: Tokenizer,
}

impl Indexer {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn build(&self, document_id: &str, passages: Vec<Passage>) -> DocumentIndex {
        let mut index = DocumentIndex::empty(document_id);

        for mut passage in passages {
            let mut term_frequency = BTreeMap::new();
            for term in self.tokenizer.terms(&passage.text) {
                *term_frequency.entry(term).or_insert(0) += 1;
            }

            let position = index.passages.len();
            for term in term_frequency.keys() {
                index
                    .postings
                    .entry(term.clone())
                    .or_default()
                    .insert(position);
            }

            passage.index = position;
            passage.term_frequency = term_frequency;
            index.passages.push(passage);
        }

        debug!(
            "Indexed {} passages, vocabulary {}",
            index.passages.len(),
            index.postings.len()
        );

        index
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new(Tokenizer::default())
    }
}
