// file: src/models/question.rs
// description: tokenized user question
// reference: internal data structures

use crate::index::Tokenizer;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub raw_text: String,
    pub tokens: Vec<String>,
}

impl Question {
    pub fn new(raw_text: &str, tokenizer: &Tokenizer) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            tokens: tokenizer.terms(raw_text),
        }
    }

    /// Query terms in first-occurrence order, without repeats.
    pub fn distinct_terms(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            if !seen.contains(&token.as_str()) {
                seen.push(token.as_str());
            }
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
