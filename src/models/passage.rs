// file: src/models/passage.rs
// description: passage model, the unit of retrieval
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Position in the document, 0-based. Defines reading order.
    pub index: usize,

    /// Display text with internal whitespace collapsed.
    pub text: String,

    /// Byte range of this passage in the document's extracted text.
    pub span: Range<usize>,

    /// Indexed term -> occurrences in this passage. Filled by the indexer.
    pub term_frequency: BTreeMap<String, usize>,
}

impl Passage {
    pub fn new(index: usize, text: String, span: Range<usize>) -> Self {
        Self {
            index,
            text,
            span,
            term_frequency: BTreeMap::new(),
        }
    }

    pub fn frequency(&self, term: &str) -> usize {
        self.term_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn preview(&self, max_chars: usize) -> String {
        if self.text.chars().count() <= max_chars {
            self.text.clone()
        } else {
            let cut: String = self.text.chars().take(max_chars).collect();
            format!("{}...", cut)
        }
    }
}
