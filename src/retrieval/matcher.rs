// file: src/retrieval/matcher.rs
// description: scores every passage of one document against a question
// reference: tf-idf over the document's own passages

use crate::index::{DocumentIndex, Tokenizer};
use crate::models::Question;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredPassage {
    pub index: usize,
    pub score: f64,
}

/// `ln(1 + N / df)`. Stays positive when a term occurs in every passage, so a
/// one-passage document can still be matched.
pub fn inverse_document_frequency(passages: usize, document_frequency: usize) -> f64 {
    if document_frequency == 0 {
        return 0.0;
    }
    (1.0 + passages as f64 / document_frequency as f64).ln()
}

pub struct QueryMatcher {
    tokenizer: Tokenizer,
}

impl QueryMatcher {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn question(&self, raw_text: &str) -> Question {
        Question::new(raw_text, &self.tokenizer)
    }

    pub fn match_text(&self, index: &DocumentIndex, raw_text: &str) -> Vec<ScoredPassage> {
        self.score(index, &self.question(raw_text))
    }

    /// Passages sharing at least one term with the question, best first.
    /// Ties go to the earlier passage.
    pub fn score(&self, index: &DocumentIndex, question: &Question) -> Vec<ScoredPassage> {
        if question.is_empty() || index.is_empty() {
            return Vec::new();
        }

        let total = index.len();
        let mut scores: BTreeMap<usize, f64> = BTreeMap::new();

        for term in question.distinct_terms() {
            let Some(postings) = index.postings(term) else {
                continue;
            };
            let idf = inverse_document_frequency(total, postings.len());

            for &position in postings {
                let tf = index
                    .passage(position)
                    .map_or(0, |passage| passage.frequency(term));
                *scores.entry(position).or_insert(0.0) += tf as f64 * idf;
            }
        }

        let mut ranked: Vec<ScoredPassage> = scores
            .into_iter()
            .filter(|&(_, score)| score > 0.0)
            .map(|(index, score)| ScoredPassage { index, score })
            .collect();

        ranked.sort_by(|a, b| compare_ranked(a, b));

        debug!(
            "Question {:?} matched {} of {} passages",
            question.tokens,
            ranked.len(),
            total
        );

        ranked
    }
}

impl Default for QueryMatcher {
    fn default() -> Self {
        Self::new(Tokenizer::default())
    }
}

fn compare_ranked(a: &ScoredPassage, b: &ScoredPassage) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
}
