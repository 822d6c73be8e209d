// file: src/retrieval/selector.rs
// description: picks answer passages and classifies confidence
// reference: score gap between best and runner-up decides high vs low

use crate::config::{DEFAULT_CONFIDENCE_RATIO, DEFAULT_MAX_CONTEXT_PASSAGES, EngineConfig};
use crate::models::{Answer, Confidence, Passage};
use crate::retrieval::matcher::ScoredPassage;

pub const MIN_CONTEXT_PASSAGES: usize = 2;
pub const MAX_CONTEXT_PASSAGES: usize = 3;

#[derive(Debug, Clone)]
pub struct AnswerSelector {
    confidence_ratio: f64,
    context_passages: usize,
}

impl AnswerSelector {
    pub fn new(confidence_ratio: f64, max_context_passages: usize) -> Self {
        Self {
            confidence_ratio,
            context_passages: max_context_passages.clamp(MIN_CONTEXT_PASSAGES, MAX_CONTEXT_PASSAGES),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.confidence_ratio, config.max_context_passages)
    }

    /// `scored` must be ranked best first, as produced by the matcher.
    pub fn select(&self, scored: &[ScoredPassage], passages: &[Passage]) -> Answer {
        let Some(top) = scored.first() else {
            return Answer::none();
        };

        let confidence = match scored.get(1) {
            None => Confidence::High,
            Some(second) if top.score > self.confidence_ratio * second.score => Confidence::High,
            Some(_) => Confidence::Low,
        };

        let take = match confidence {
            Confidence::High => 1,
            _ => self.context_passages,
        };

        let selected: Vec<Passage> = scored
            .iter()
            .take(take)
            .filter_map(|s| passages.get(s.index).cloned())
            .collect();

        if selected.is_empty() {
            return Answer::none();
        }

        Answer::from_passages(selected, top.score, confidence)
    }
}

impl Default for AnswerSelector {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_RATIO, DEFAULT_MAX_CONTEXT_PASSAGES)
    }
}
