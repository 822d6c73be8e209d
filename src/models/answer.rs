// file: src/models/answer.rs
// description: Answer model with score and confidence classification
// reference: Used as the result of answering a question against one document

use crate::models::Passage;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_MATCH_MESSAGE: &str = "No relevant information found in the document.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
    None,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::High => "high",
            Confidence::Low => "low",
            Confidence::None => "none",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Selected passages in document order.
    pub passages: Vec<Passage>,

    /// Score of the best passage (0 when nothing matched).
    pub score: f64,

    pub confidence: Confidence,

    /// Passage texts joined by a single space.
    pub text: String,
}

impl Answer {
    pub fn none() -> Self {
        Self {
            passages: Vec::new(),
            score: 0.0,
            confidence: Confidence::None,
            text: String::new(),
        }
    }

    /// Build an answer from already-selected passages; reorders them by
    /// document position before formatting.
    pub fn from_passages(mut passages: Vec<Passage>, score: f64, confidence: Confidence) -> Self {
        passages.sort_by_key(|p| p.index);
        let text = passages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            passages,
            score,
            confidence,
            text,
        }
    }

    pub fn is_found(&self) -> bool {
        self.confidence != Confidence::None
    }

    pub fn passage_indices(&self) -> Vec<usize> {
        self.passages.iter().map(|p| p.index).collect()
    }

    /// Message shown to the user.
    pub fn render(&self) -> String {
        if self.is_found() {
            self.text.clone()
        } else {
            NO_MATCH_MESSAGE.to_string()
        }
    }
}
